//! Traits describing read-only host data.
//!
//! Oracles expose the equipment catalog, the skill catalog, and session
//! configuration. The [`Env`] aggregate bundles them so registry and ledger
//! operations can access everything they need without hard coupling to
//! concrete implementations.
mod catalog;
mod config;
mod error;
mod skills;

pub use catalog::CatalogOracle;
pub use config::ConfigOracle;
pub use error::OracleError;
pub use skills::SkillOracle;

/// Aggregates read-only oracles required by registry and ledger operations.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, C, S, W>
where
    C: CatalogOracle + ?Sized,
    S: SkillOracle + ?Sized,
    W: ConfigOracle + ?Sized,
{
    catalog: Option<&'a C>,
    skills: Option<&'a S>,
    config: Option<&'a W>,
}

pub type ArmoryEnv<'a> = Env<'a, dyn CatalogOracle + 'a, dyn SkillOracle + 'a, dyn ConfigOracle + 'a>;

impl<'a, C, S, W> Env<'a, C, S, W>
where
    C: CatalogOracle + ?Sized,
    S: SkillOracle + ?Sized,
    W: ConfigOracle + ?Sized,
{
    pub fn new(catalog: Option<&'a C>, skills: Option<&'a S>, config: Option<&'a W>) -> Self {
        Self {
            catalog,
            skills,
            config,
        }
    }

    pub fn with_all(catalog: &'a C, skills: &'a S, config: &'a W) -> Self {
        Self::new(Some(catalog), Some(skills), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            skills: None,
            config: None,
        }
    }

    /// Returns the CatalogOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog oracle was provided.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the SkillOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a S, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a W, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the durability defaults from the config oracle.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn defaults(&self) -> Result<crate::config::ArmoryConfig, OracleError> {
        Ok(self.config()?.config())
    }
}

impl<'a, C, S, W> Env<'a, C, S, W>
where
    C: CatalogOracle + 'a,
    S: SkillOracle + 'a,
    W: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `ArmoryEnv` (consumes self).
    ///
    /// Use this when you need to convert once and don't need the original `Env` anymore.
    pub fn into_armory_env(self) -> ArmoryEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|skills| skills as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(catalog, skills, config)
    }

    /// Converts this environment into a trait-object based `ArmoryEnv` (borrows self).
    ///
    /// Use this when you need to convert multiple times (e.g., in a loop).
    pub fn as_armory_env(&self) -> ArmoryEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|skills| skills as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(catalog, skills, config)
    }
}
