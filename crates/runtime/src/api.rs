//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the equipment core, content loading, and repositories
//! so hosts can bubble them up with consistent context.

use thiserror::Error;

use armory_core::{EquipError, OracleError, RegistryError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session requires oracles to be configured before building")]
    MissingOracles,

    #[error("no save repository configured for this session")]
    RepositoryNotSet,

    #[error("save slot {slot} is empty")]
    EmptySlot { slot: u32 },

    #[error("failed to load content: {0}")]
    ContentLoad(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
