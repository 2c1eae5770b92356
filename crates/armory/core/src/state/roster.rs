//! Roster members and their equipment loadouts.

use std::fmt;

use arrayvec::ArrayVec;
use bounded_vector::BoundedVec;

use crate::catalog::EquipKind;
use crate::config::ArmoryConfig;
use crate::state::error::StateError;
use crate::state::items::{EquipRef, InstanceId};

/// Identifier of a roster member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat stat contributions summed from equipped item tags.
///
/// Recomputed from resolved items on every slot write; never edited
/// directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipBonuses {
    pub attack: i32,
    pub defense: i32,
}

/// One loadout seat: the kind it accepts and what currently sits in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutSlot {
    pub kind: EquipKind,
    pub item: Option<EquipRef>,
}

impl LoadoutSlot {
    pub fn empty(kind: EquipKind) -> Self {
        Self { kind, item: None }
    }

    /// Seats `item`, returning whatever was displaced.
    pub fn seat(&mut self, item: EquipRef) -> Option<EquipRef> {
        self.item.replace(item)
    }

    /// Empties the seat, returning the displaced item if any.
    pub fn vacate(&mut self) -> Option<EquipRef> {
        self.item.take()
    }
}

/// A roster member's equipment loadout.
///
/// # Invariants
///
/// - `bonuses` must always reflect the currently seated items
/// - Slots are written only through the equip and breakage paths, which
///   both refresh `bonuses`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorLoadout {
    pub id: ActorId,
    pub name: String,
    pub slots: ArrayVec<LoadoutSlot, { ArmoryConfig::MAX_LOADOUT_SLOTS }>,
    pub bonuses: EquipBonuses,
}

impl ActorLoadout {
    /// Creates a loadout with no slots. Add seats with [`Self::add_slot`].
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slots: ArrayVec::new(),
            bonuses: EquipBonuses::default(),
        }
    }

    /// Creates a loadout with one empty seat per kind, in order.
    ///
    /// # Errors
    ///
    /// Returns `StateError::LoadoutFull` when `kinds` exceeds the slot capacity.
    pub fn with_kinds(
        id: ActorId,
        name: impl Into<String>,
        kinds: &[EquipKind],
    ) -> Result<Self, StateError> {
        let mut loadout = Self::new(id, name);
        for kind in kinds {
            loadout.add_slot(*kind)?;
        }
        Ok(loadout)
    }

    /// Appends an empty seat accepting `kind`, returning its index.
    pub fn add_slot(&mut self, kind: EquipKind) -> Result<usize, StateError> {
        self.slots
            .try_push(LoadoutSlot::empty(kind))
            .map_err(|_| StateError::LoadoutFull {
                max: ArmoryConfig::MAX_LOADOUT_SLOTS,
                current: self.slots.len(),
            })?;
        Ok(self.slots.len() - 1)
    }

    pub fn slot(&self, index: usize) -> Option<&LoadoutSlot> {
        self.slots.get(index)
    }

    /// Iterates over every seated item.
    pub fn equipped(&self) -> impl Iterator<Item = EquipRef> + '_ {
        self.slots.iter().filter_map(|slot| slot.item)
    }

    /// True when `item` is seated in any slot.
    pub fn has_equipped(&self, item: EquipRef) -> bool {
        self.equipped().any(|seated| seated == item)
    }
}

/// Where an item sits: which member, which slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotLocation {
    pub actor: ActorId,
    pub slot: usize,
}

/// All roster members tracked by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterState {
    pub members: BoundedVec<ActorLoadout, 0, { ArmoryConfig::MAX_ROSTER }>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member.
    ///
    /// # Errors
    ///
    /// Returns `StateError::RosterFull` when the roster is at capacity.
    pub fn add(&mut self, loadout: ActorLoadout) -> Result<(), StateError> {
        let current = self.members.len();
        self.members
            .push(loadout)
            .map_err(|_| StateError::RosterFull {
                max: ArmoryConfig::MAX_ROSTER,
                current,
            })
    }

    /// Returns a reference to a member by id.
    pub fn actor(&self, id: ActorId) -> Option<&ActorLoadout> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Returns a mutable reference to a member by id.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorLoadout> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorLoadout> {
        self.members.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActorLoadout> {
        self.members.iter_mut()
    }

    /// Every seat across the roster currently holding `instance`.
    ///
    /// Normally at most one, but the sweep is exhaustive so a duplicated
    /// seat can never survive a breakage.
    pub fn holders_of(&self, instance: InstanceId) -> Vec<SlotLocation> {
        let wanted = EquipRef::Instance(instance);
        let mut holders = Vec::new();
        for member in self.members.iter() {
            for (index, slot) in member.slots.iter().enumerate() {
                if slot.item == Some(wanted) {
                    holders.push(SlotLocation {
                        actor: member.id,
                        slot: index,
                    });
                }
            }
        }
        holders
    }
}
