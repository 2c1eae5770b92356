//! Configuration oracle exposing session-wide durability defaults.

use crate::config::ArmoryConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Returns the durability defaults for this session.
    fn config(&self) -> ArmoryConfig;
}
