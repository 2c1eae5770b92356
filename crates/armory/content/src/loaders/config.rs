//! Durability defaults loader.

use std::path::Path;

use armory_core::{ArmoryConfig, Durability};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk dialect of [`ArmoryConfig`] for TOML files.
///
/// Keeps the legacy `-1` spelling: for durabilities it means unlimited, for
/// loss amounts it means none. The sentinel is mapped to core types here
/// and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub default_durability: i64,
    pub default_max_durability: i64,
    pub default_use_loss: i64,
    pub default_damage_loss: i64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            default_durability: -1,
            default_max_durability: -1,
            default_use_loss: -1,
            default_damage_loss: -1,
        }
    }
}

fn durability_from(raw: i64) -> Durability {
    if raw < 0 {
        Durability::Unlimited
    } else {
        Durability::Finite(u32::try_from(raw).unwrap_or(u32::MAX))
    }
}

fn loss_from(raw: i64) -> u32 {
    if raw < 0 {
        0
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

impl From<ConfigFile> for ArmoryConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            default_durability: durability_from(file.default_durability),
            default_max_durability: durability_from(file.default_max_durability),
            default_use_loss: loss_from(file.default_use_loss),
            default_damage_loss: loss_from(file.default_damage_loss),
        }
    }
}

/// Loader for durability defaults from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load durability defaults from a TOML file.
    ///
    /// Missing keys fall back to `-1`, so an empty file yields the inert
    /// stock configuration.
    pub fn load(path: &Path) -> LoadResult<ArmoryConfig> {
        let content = read_file(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(file.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sentinel_maps_to_unlimited_and_zero() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
default_durability = 20
default_use_loss = 1
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.default_durability, Durability::Finite(20));
        // Unspecified keys keep the -1 sentinel semantics.
        assert_eq!(config.default_max_durability, Durability::Unlimited);
        assert_eq!(config.default_use_loss, 1);
        assert_eq!(config.default_damage_loss, 0);
    }

    #[test]
    fn empty_file_yields_the_inert_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config, ArmoryConfig::new());
    }
}
