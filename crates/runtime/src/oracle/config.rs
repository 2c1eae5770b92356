//! Config oracle implementation for the runtime.

use armory_core::{ArmoryConfig, env::ConfigOracle};

/// Runtime implementation of ConfigOracle that wraps ArmoryConfig
pub struct ConfigOracleImpl {
    config: ArmoryConfig,
}

impl ConfigOracleImpl {
    pub fn new(config: ArmoryConfig) -> Self {
        Self { config }
    }
}

impl Default for ConfigOracleImpl {
    fn default() -> Self {
        Self::new(ArmoryConfig::default())
    }
}

impl ConfigOracle for ConfigOracleImpl {
    fn config(&self) -> ArmoryConfig {
        self.config.clone()
    }
}
