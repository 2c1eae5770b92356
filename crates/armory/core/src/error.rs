//! Common error infrastructure for armory-core.
//!
//! Domain-specific errors (`RegistryError`, `EquipError`, ...) are defined in
//! their respective modules alongside the operations they validate. This
//! module provides the shared severity classification they all implement.
//!
//! Two failure families deliberately do not appear here at all:
//! not-applicable outcomes (asking for an instance of a non-individuated
//! template, reducing an unlimited item) are `Option`/`bool` returns, and
//! malformed tag values are collected as [`crate::tags::TagIssue`]s on
//! reports instead of aborting the operation that found them.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: item not in stock, slot occupied by another instance
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown actor, slot index out of range, kind mismatch
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: loadout slot referencing a retired instance
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - the session is miswired or corrupted, cannot continue.
    ///
    /// Examples: missing required oracle, instance id space exhausted
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all armory-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// Implementations use `#[derive(thiserror::Error)]` for Display/Error and
/// classify severity based on recoverability, not impact.
pub trait ArmoryError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing. Default implementation
    /// uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
