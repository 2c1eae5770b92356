use crate::state::Durability;

/// Session-wide durability defaults and tunable parameters.
///
/// The stock configuration is inert: untagged items never wear and untagged
/// triggers cost nothing, so hosts opt into durability per item (or raise
/// the defaults here to make it universal).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmoryConfig {
    /// Starting durability for instances whose template has no `durability` tag.
    pub default_durability: Durability,
    /// Ceiling used when an item declares a zero start and no explicit maximum.
    pub default_max_durability: Durability,
    /// Durability lost per action use when no `use_loss` tag applies.
    pub default_use_loss: u32,
    /// Durability lost per damaging hit when no `damage_loss` tag applies.
    pub default_damage_loss: u32,
}

impl ArmoryConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of roster members with loadouts.
    pub const MAX_ROSTER: usize = 16;
    /// Maximum number of slots in a single loadout.
    pub const MAX_LOADOUT_SLOTS: usize = 8;

    pub fn new() -> Self {
        Self {
            default_durability: Durability::Unlimited,
            default_max_durability: Durability::Unlimited,
            default_use_loss: 0,
            default_damage_loss: 0,
        }
    }
}

impl Default for ArmoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
