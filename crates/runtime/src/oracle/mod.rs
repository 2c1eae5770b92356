//! Runtime wrappers around static content oracles.
//!
//! These implementations expose `armory-core` oracle traits and bundle them
//! into an [`OracleManager`] so the runtime can build [`armory_core::Env`]
//! snapshots on demand. The data is immutable at runtime; dynamic state
//! lives in [`armory_core::ArmoryState`].
mod catalog;
mod config;
mod skills;

use std::path::Path;
use std::sync::Arc;

use armory_core::{ArmoryConfig, ArmoryEnv, Env};
use armory_content::{CatalogLoader, ConfigLoader, SkillLoader};

use crate::api::{Result, RuntimeError};

pub use catalog::CatalogOracleImpl;
pub use config::ConfigOracleImpl;
pub use skills::SkillOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<CatalogOracleImpl>,
    pub(crate) skills: Arc<SkillOracleImpl>,
    pub(crate) config: Arc<ConfigOracleImpl>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        catalog: Arc<CatalogOracleImpl>,
        skills: Arc<SkillOracleImpl>,
        config: Arc<ConfigOracleImpl>,
    ) -> Self {
        Self {
            catalog,
            skills,
            config,
        }
    }

    /// Loads all oracles from a content directory.
    ///
    /// Expects `equipment.ron`; `skills.ron` and `defaults.toml` are
    /// optional. A missing skill catalog leaves name-keyed `skill_loss`
    /// overrides unresolvable, and a missing defaults file yields the inert
    /// stock configuration.
    pub fn from_content_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let templates = CatalogLoader::load(&dir.join("equipment.ron"))
            .map_err(|e| RuntimeError::ContentLoad(e.to_string()))?;

        let skills_path = dir.join("skills.ron");
        let skills = if skills_path.exists() {
            SkillLoader::load(&skills_path)
                .map_err(|e| RuntimeError::ContentLoad(e.to_string()))?
        } else {
            Vec::new()
        };

        let defaults_path = dir.join("defaults.toml");
        let config = if defaults_path.exists() {
            ConfigLoader::load(&defaults_path)
                .map_err(|e| RuntimeError::ContentLoad(e.to_string()))?
        } else {
            ArmoryConfig::default()
        };

        Ok(Self::new(
            Arc::new(CatalogOracleImpl::from_templates(templates)),
            Arc::new(SkillOracleImpl::from_skills(skills)),
            Arc::new(ConfigOracleImpl::new(config)),
        ))
    }

    /// Converts oracle manager into ArmoryEnv for armory-core
    pub fn as_armory_env(&self) -> ArmoryEnv<'_> {
        Env::with_all(
            self.catalog.as_ref(),
            self.skills.as_ref(),
            self.config.as_ref(),
        )
        .into_armory_env()
    }
}
