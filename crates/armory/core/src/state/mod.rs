//! Authoritative subsystem state.
//!
//! This module owns the data structures that describe individuated
//! instances, party stock, roster loadouts, and encounter bookkeeping.
//! Hosts clone or query this state but mutate it exclusively through the
//! registry, ledger, and loadout operations.
pub mod error;
pub mod items;
pub mod party;
pub mod roster;
pub mod session;

pub use bounded_vector::BoundedVec;
pub use error::StateError;
pub use items::{Durability, EquipRef, InstanceId, ItemInstance, RegistryState};
pub use party::PartyState;
pub use roster::{ActorId, ActorLoadout, EquipBonuses, LoadoutSlot, RosterState, SlotLocation};
pub use session::SessionState;

/// Canonical snapshot of everything the subsystem owns.
///
/// This is the save payload: the instance table with its id allocator, the
/// party stock, every loadout, and the encounter flag all persist together,
/// so instance identity survives save/reload unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmoryState {
    /// Individuated instances and their id allocator.
    pub registry: RegistryState,
    /// Owned-but-unequipped stock.
    pub party: PartyState,
    /// Roster members and their loadouts.
    pub roster: RosterState,
    /// Encounter bookkeeping.
    pub session: SessionState,
}

impl ArmoryState {
    /// Creates an empty state: no instances, no stock, no roster members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the encounter flag on. Ordinary equipping locks until
    /// [`Self::end_encounter`].
    pub fn begin_encounter(&mut self) {
        self.session.in_encounter = true;
    }

    pub fn end_encounter(&mut self) {
        self.session.in_encounter = false;
    }

    pub fn in_encounter(&self) -> bool {
        self.session.in_encounter
    }
}
