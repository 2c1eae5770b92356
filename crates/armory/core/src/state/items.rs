//! Instance-side item types: durability values, instance ids, the instance
//! table, and the reference type loadout slots and inventory keys use.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{EquipKind, TemplateId};
use crate::state::error::StateError;
use crate::tags::TagMap;

/// Remaining or maximum durability of an item instance.
///
/// `Unlimited` items never wear and never break; reductions leave them
/// untouched. Finite values clamp at zero, they never go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Durability {
    Finite(u32),
    Unlimited,
}

impl Durability {
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    pub const fn is_depleted(&self) -> bool {
        matches!(self, Self::Finite(0))
    }

    /// Subtracts `amount`, clamping at zero. Unlimited values are unchanged.
    #[must_use]
    pub const fn saturating_sub(self, amount: u32) -> Self {
        match self {
            Self::Finite(value) => Self::Finite(value.saturating_sub(amount)),
            Self::Unlimited => Self::Unlimited,
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Identifier of an individuated item instance.
///
/// Allocated monotonically from [`InstanceId::FLOOR`] and never reused, so
/// instance ids and template ids occupy disjoint ranges of the same `u32`
/// space and a bare id can be classified by range alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// First id in the instance namespace. Catalog templates stay below it.
    pub const FLOOR: Self = Self(10_000);
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A uniquely owned copy of a catalog template.
///
/// Created by the registry when an individuated template is acquired or
/// equipped. Carries its own durability and a deep copy of the template
/// tags, so later catalog edits do not retroactively change live items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub id: InstanceId,
    /// Back-reference to the template this instance was minted from.
    pub template: TemplateId,
    pub kind: EquipKind,
    pub name: String,
    pub tags: TagMap,
    /// Remaining durability. Never exceeds `maximum` when both are finite.
    pub durability: Durability,
    pub maximum: Durability,
    /// Reserved enhancement counter, starts at zero.
    pub upgrade_level: u32,
}

impl ItemInstance {
    pub fn is_broken(&self) -> bool {
        self.durability.is_depleted()
    }
}

/// Reference to an ordinary template or an individuated instance.
///
/// This is the key type for inventory counts and loadout slots: ordinary
/// stackable equipment is referenced by template, individuated equipment by
/// its unique instance id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipRef {
    Template(TemplateId),
    Instance(InstanceId),
}

impl EquipRef {
    /// Classifies a bare id by the instance namespace split.
    pub const fn from_raw(id: u32) -> Self {
        if id >= InstanceId::FLOOR.0 {
            Self::Instance(InstanceId(id))
        } else {
            Self::Template(TemplateId(id))
        }
    }

    pub const fn as_instance(&self) -> Option<InstanceId> {
        match self {
            Self::Instance(id) => Some(*id),
            Self::Template(_) => None,
        }
    }

    pub const fn as_template(&self) -> Option<TemplateId> {
        match self {
            Self::Template(id) => Some(*id),
            Self::Instance(_) => None,
        }
    }
}

impl From<TemplateId> for EquipRef {
    fn from(id: TemplateId) -> Self {
        Self::Template(id)
    }
}

impl From<InstanceId> for EquipRef {
    fn from(id: InstanceId) -> Self {
        Self::Instance(id)
    }
}

impl fmt::Display for EquipRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(id) => write!(f, "{id}"),
            Self::Instance(id) => write!(f, "{id}"),
        }
    }
}

/// The instance table plus its id allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryState {
    /// Sequential instance id allocator (monotonically increasing).
    ///
    /// Never reused and persisted with the state, so ids stay unique across
    /// save/reload and retirement.
    next_instance_id: u32,

    /// Live instances keyed by id. BTreeMap keeps iteration deterministic.
    instances: BTreeMap<InstanceId, ItemInstance>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self {
            next_instance_id: InstanceId::FLOOR.0,
            instances: BTreeMap::new(),
        }
    }

    /// Allocates the next unique instance id.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InstanceIdOverflow` if the id space is exhausted.
    pub(crate) fn allocate_instance_id(&mut self) -> Result<InstanceId, StateError> {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id =
            self.next_instance_id
                .checked_add(1)
                .ok_or(StateError::InstanceIdOverflow {
                    current: self.next_instance_id,
                })?;
        Ok(id)
    }

    pub(crate) fn insert(&mut self, instance: ItemInstance) {
        self.instances.insert(instance.id, instance);
    }

    pub(crate) fn remove(&mut self, id: InstanceId) -> Option<ItemInstance> {
        self.instances.remove(&id)
    }

    pub fn get(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.instances.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut ItemInstance> {
        self.instances.get_mut(&id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for RegistryState {
    fn default() -> Self {
        Self::new()
    }
}
