//! Catalog definitions: template items and skills.
//!
//! Templates are the immutable, database-owned half of the item model.
//! They are exposed to the core through [`crate::env::CatalogOracle`] and are
//! never mutated at runtime; everything mutable (instances, durability,
//! counts, loadouts) lives in [`crate::state`].

use std::fmt;

use crate::tags::TagMap;

/// Identifier of a template item within the host catalog.
///
/// Template identifiers are small positive integers assigned by the catalog.
/// They never collide with [`crate::state::InstanceId`]s, which are allocated
/// from a disjoint namespace starting at [`crate::state::InstanceId::FLOOR`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a skill in the host skill catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equipment kind partitioning the catalog.
///
/// Every template and every instance is exactly one kind; loadout slots are
/// declared with the kind they accept.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipKind {
    /// Weapons occupy weapon slots and typically carry `attack` tags.
    Weapon,
    /// Armor occupies armor slots and typically carries `defense` tags.
    Armor,
}

/// Immutable catalog definition of a weapon or armor piece.
///
/// The `tags` map carries all optional behavior: individuation, durability
/// values, loss amounts, per-skill overrides, the breakage replacement, and
/// flat stat contributions. See [`crate::tags`] for the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateItem {
    pub id: TemplateId,
    pub kind: EquipKind,
    pub name: String,
    pub tags: TagMap,
}

impl TemplateItem {
    pub fn new(id: TemplateId, kind: EquipKind, name: impl Into<String>, tags: TagMap) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            tags,
        }
    }

    /// True when this template mints a unique instance on acquisition.
    pub fn is_individuated(&self) -> bool {
        self.tags.flag(crate::tags::UNIQUE)
    }
}

/// Skill catalog entry.
///
/// Only the identifier and display name are needed here: the name is what
/// per-skill loss overrides resolve against.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
