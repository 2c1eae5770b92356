//! Runtime orchestration for the equipment subsystem.
//!
//! This crate wires the equipment core, content oracles, event hooks, and
//! save repositories into a cohesive session API. Consumers embed
//! [`Session`] to report combat events, manage loadouts, and persist the
//! armory snapshot.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the error types downstream hosts interact with
//! - [`events`] defines the combat notifications hosts dispatch
//! - [`hooks`] provides the event hook system (wear, custom subscribers)
//! - [`message`] routes player-facing announcements
//! - [`oracle`] and [`repository`] provide data adapters around the core
pub mod api;
pub mod events;
pub mod hooks;
pub mod message;
pub mod oracle;
pub mod repository;
pub mod session;

pub use api::{Result, RuntimeError};
pub use events::CombatEvent;
pub use hooks::{EventHook, HookCriticality, HookRegistry, WearHook};
pub use message::{BufferSink, MessageSink, TracingSink};
pub use oracle::{CatalogOracleImpl, ConfigOracleImpl, OracleManager, SkillOracleImpl};
pub use repository::{FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveRepository};
pub use session::{Session, SessionBuilder};
