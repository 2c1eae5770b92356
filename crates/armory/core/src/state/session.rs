//! Encounter bookkeeping.

/// Tracks whether an encounter is in progress.
///
/// While `in_encounter` is set, the ordinary equip path is locked; only the
/// breakage replacement path may rewrite loadout slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub in_encounter: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
