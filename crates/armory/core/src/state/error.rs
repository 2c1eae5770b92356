//! State management errors.
//!
//! Errors related to capacity limits and identifier allocation.

use crate::error::{ArmoryError, ErrorSeverity};

/// Errors that occur during state construction and bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Roster is full (max capacity reached).
    #[error("Roster is full (max: {max}, current: {current})")]
    RosterFull {
        /// Maximum capacity.
        max: usize,
        /// Current count.
        current: usize,
    },

    /// Loadout has no room for another slot.
    #[error("Loadout is full (max: {max}, current: {current})")]
    LoadoutFull {
        /// Maximum capacity.
        max: usize,
        /// Current count.
        current: usize,
    },

    /// Instance id allocation overflow (all ids exhausted).
    #[error("Instance id overflow (current: {current})")]
    InstanceIdOverflow {
        /// Current id value when overflow occurred.
        current: u32,
    },
}

impl ArmoryError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // Capacity errors are validation errors - invalid to add more
            RosterFull { .. } | LoadoutFull { .. } => ErrorSeverity::Validation,

            // Id overflow is fatal - cannot continue
            InstanceIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            RosterFull { .. } => "STATE_ROSTER_FULL",
            LoadoutFull { .. } => "STATE_LOADOUT_FULL",
            InstanceIdOverflow { .. } => "STATE_INSTANCE_ID_OVERFLOW",
        }
    }
}
