//! Data-driven content definitions and loaders.
//!
//! This crate converts data files into armory-core types:
//! - Equipment catalogs (data-driven via RON)
//! - Skill catalogs (data-driven via RON)
//! - Durability defaults (data-driven via TOML, keeping the legacy `-1`
//!   unlimited sentinel as an on-disk spelling only)
//!
//! Content is consumed by runtime oracles and never appears in session
//! state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, SkillLoader};
