//! Ordinary loadout operations: guarded equipping and bonus refresh.
//!
//! This is the path hosts use between encounters. It trades items with the
//! party pool, individuates unique templates on the way in, and keeps each
//! member's [`EquipBonuses`] in sync with what is seated. While an
//! encounter runs the whole path is locked; only the breakage flow in the
//! ledger may rewrite seats then.

use crate::catalog::{EquipKind, TemplateItem};
use crate::env::ArmoryEnv;
use crate::error::{ArmoryError, ErrorSeverity};
use crate::registry::RegistryError;
use crate::state::{ActorId, ArmoryState, EquipBonuses, EquipRef, InstanceId};
use crate::tags::{ATTACK, DEFENSE, TagMap};

/// Errors from the ordinary equip path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipError {
    /// Equipment changes are locked while an encounter runs.
    #[error("equipment changes are locked during an encounter")]
    EncounterLocked,

    /// Actor is not in the roster.
    #[error("actor {0} not found in roster")]
    UnknownActor(ActorId),

    /// Slot index past the end of the actor's loadout.
    #[error("slot {slot} out of range for actor {actor} ({len} slots)")]
    SlotOutOfRange {
        actor: ActorId,
        slot: usize,
        len: usize,
    },

    /// Item kind does not match what the slot accepts.
    #[error("{item} is a {item_kind}, slot {slot} accepts {slot_kind}")]
    KindMismatch {
        item: EquipRef,
        item_kind: EquipKind,
        slot: usize,
        slot_kind: EquipKind,
    },

    /// The party does not stock the item.
    #[error("{item} is not in party stock")]
    NotInStock { item: EquipRef },

    /// The instance already sits in another seat.
    #[error("instance {instance} is already equipped by actor {holder}")]
    AlreadyEquipped {
        instance: InstanceId,
        holder: ActorId,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ArmoryError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EncounterLocked | Self::NotInStock { .. } | Self::AlreadyEquipped { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownActor(_) | Self::SlotOutOfRange { .. } | Self::KindMismatch { .. } => {
                ErrorSeverity::Validation
            }
            Self::Registry(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EncounterLocked => "EQUIP_ENCOUNTER_LOCKED",
            Self::UnknownActor(_) => "EQUIP_UNKNOWN_ACTOR",
            Self::SlotOutOfRange { .. } => "EQUIP_SLOT_OUT_OF_RANGE",
            Self::KindMismatch { .. } => "EQUIP_KIND_MISMATCH",
            Self::NotInStock { .. } => "EQUIP_NOT_IN_STOCK",
            Self::AlreadyEquipped { .. } => "EQUIP_ALREADY_EQUIPPED",
            Self::Registry(err) => err.error_code(),
        }
    }
}

/// Reads a signed stat tag, treating anything unreadable as zero.
fn stat_value(item_tags: &TagMap, key: &str) -> i32 {
    item_tags
        .get(key)
        .and_then(|value| value.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

impl ArmoryState {
    /// Seats `item` in the actor's slot, or empties the slot with `None`.
    ///
    /// The trade is symmetric with the party pool: the incoming item is
    /// drawn from stock, whatever was displaced goes back. A unique
    /// template individuates on the way in - either by converting one unit
    /// of template stock into a fresh instance or by picking the lowest-id
    /// stocked instance of that template. Bonuses refresh before returning.
    ///
    /// # Errors
    ///
    /// - `EncounterLocked` while an encounter runs (checked first, so a
    ///   locked attempt never mints anything)
    /// - `UnknownActor` / `SlotOutOfRange` for a bad destination
    /// - `KindMismatch` when the item does not fit the slot
    /// - `NotInStock` when the party has no unit to seat
    /// - `AlreadyEquipped` when the instance sits in some other seat
    pub fn equip(
        &mut self,
        env: &ArmoryEnv<'_>,
        actor: ActorId,
        slot: usize,
        item: Option<EquipRef>,
    ) -> Result<(), EquipError> {
        let member = self
            .roster
            .actor(actor)
            .ok_or(EquipError::UnknownActor(actor))?;
        let len = member.slots.len();
        let slot_state = *member
            .slot(slot)
            .ok_or(EquipError::SlotOutOfRange { actor, slot, len })?;
        if self.session.in_encounter {
            return Err(EquipError::EncounterLocked);
        }

        let item = match item {
            Some(item) => item,
            None => {
                self.vacate_seat(env, actor, slot);
                return Ok(());
            }
        };

        let base = self.resolve_base(env, item)?;
        if base.kind != slot_state.kind {
            return Err(EquipError::KindMismatch {
                item,
                item_kind: base.kind,
                slot,
                slot_kind: slot_state.kind,
            });
        }

        let resolved = if base.is_individuated() {
            EquipRef::Instance(self.individuate_for_equip(env, item, &base)?)
        } else {
            item
        };

        // Re-seating the identical item is a no-op.
        if slot_state.item == Some(resolved) {
            return Ok(());
        }

        if let Some(instance) = resolved.as_instance() {
            if let Some(holder) = self.roster.holders_of(instance).first() {
                return Err(EquipError::AlreadyEquipped {
                    instance,
                    holder: holder.actor,
                });
            }
        }

        if !self.party.has(resolved) {
            return Err(EquipError::NotInStock { item: resolved });
        }

        self.party.lose(resolved, 1);
        let displaced = match self.roster.actor_mut(actor) {
            Some(member) => member.slots[slot].seat(resolved),
            None => None,
        };
        if let Some(displaced) = displaced {
            self.party.gain(displaced, 1);
        }
        self.refresh_actor(env, actor);
        Ok(())
    }

    /// Empties one seat through the guarded path, returning the displaced
    /// item to the pool.
    fn vacate_seat(&mut self, env: &ArmoryEnv<'_>, actor: ActorId, slot: usize) {
        let displaced = match self.roster.actor_mut(actor) {
            Some(member) => match member.slots.get_mut(slot) {
                Some(seat) => seat.vacate(),
                None => None,
            },
            None => None,
        };
        if let Some(displaced) = displaced {
            self.party.gain(displaced, 1);
        }
        self.refresh_actor(env, actor);
    }

    /// Resolves the instance to seat for an individuated item.
    ///
    /// Instance refs pass through after a liveness check. A template ref
    /// first converts one unit of template stock into a fresh instance
    /// (legacy stock the host seeded directly), then falls back to the
    /// lowest-id stocked instance minted from that template.
    fn individuate_for_equip(
        &mut self,
        env: &ArmoryEnv<'_>,
        item: EquipRef,
        base: &TemplateItem,
    ) -> Result<InstanceId, EquipError> {
        match item {
            EquipRef::Instance(id) => {
                if self.registry.contains(id) {
                    Ok(id)
                } else {
                    Err(RegistryError::UnknownInstance(id).into())
                }
            }
            EquipRef::Template(_) => {
                if self.party.has(item) {
                    self.party.lose(item, 1);
                    let id = self.mint_instance(env, base)?;
                    self.party.gain(EquipRef::Instance(id), 1);
                    return Ok(id);
                }
                let candidate = self
                    .party
                    .stocked()
                    .filter_map(|(stocked, _)| stocked.as_instance())
                    .find(|id| {
                        self.registry
                            .get(*id)
                            .map(|instance| instance.template == base.id)
                            .unwrap_or(false)
                    });
                candidate.ok_or(EquipError::NotInStock { item })
            }
        }
    }

    /// Recomputes the actor's [`EquipBonuses`] from the seated items.
    ///
    /// Sums the `attack` and `defense` tags of everything that resolves;
    /// misses contribute nothing. Never fails.
    pub fn refresh_actor(&mut self, env: &ArmoryEnv<'_>, actor: ActorId) {
        let seated: Vec<EquipRef> = match self.roster.actor(actor) {
            Some(member) => member.equipped().collect(),
            None => return,
        };

        let mut bonuses = EquipBonuses::default();
        for item in seated {
            let item_tags = match item {
                EquipRef::Instance(id) => self.registry.get(id).map(|instance| instance.tags.clone()),
                EquipRef::Template(id) => env
                    .catalog()
                    .ok()
                    .and_then(|catalog| catalog.template(id))
                    .map(|template| template.tags),
            };
            let Some(item_tags) = item_tags else {
                continue;
            };
            bonuses.attack += stat_value(&item_tags, ATTACK);
            bonuses.defense += stat_value(&item_tags, DEFENSE);
        }

        if let Some(member) = self.roster.actor_mut(actor) {
            member.bonuses = bonuses;
        }
    }
}
