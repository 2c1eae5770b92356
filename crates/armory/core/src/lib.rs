//! Equipment individuation and durability rules shared across hosts.
//!
//! `armory-core` defines the canonical rules (instance registry, durability
//! ledger, guarded loadout path) and exposes pure APIs that runtime layers
//! and offline tools reuse. All state mutation flows through the operation
//! methods on [`state::ArmoryState`], and collaborator data arrives through
//! the oracle traits in [`env`].
pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod ledger;
pub mod loadout;
pub mod registry;
pub mod state;
pub mod tags;

#[cfg(test)]
pub(crate) mod testutil;

pub use catalog::{EquipKind, Skill, SkillId, TemplateId, TemplateItem};
pub use config::ArmoryConfig;
pub use env::{ArmoryEnv, CatalogOracle, ConfigOracle, Env, OracleError, SkillOracle};
pub use error::{ArmoryError, ErrorSeverity};
pub use ledger::{BreakOutcome, BreakageResolution, WearLoss, WearReport};
pub use loadout::EquipError;
pub use registry::RegistryError;
pub use state::{
    ActorId, ActorLoadout, ArmoryState, Durability, EquipBonuses, EquipRef, InstanceId,
    ItemInstance, LoadoutSlot, PartyState, RegistryState, RosterState, SessionState, SlotLocation,
    StateError,
};
pub use tags::{SkillKey, SkillLossEntry, SkillLossTable, TagIssue, TagMap, normalize_name};
