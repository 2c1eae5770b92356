//! Durability ledger operations: wear triggers, breakage resolution, and
//! the forced replacement path.
//!
//! Wear flows in through two host notifications, [`ArmoryState::on_action_used`]
//! and [`ArmoryState::on_damage_taken`]. Both walk the acting or struck
//! member's seated instances, work out the per-item loss from tags and
//! config defaults, and apply it through [`ArmoryState::reduce_durability`].
//! Depletion resolves immediately: the broken item is swapped for its
//! replacement or unseated, then retired, all before the trigger returns.

use crate::catalog::{SkillId, TemplateId};
use crate::config::ArmoryConfig;
use crate::env::{ArmoryEnv, OracleError};
use crate::state::{
    ActorId, ArmoryState, Durability, EquipRef, InstanceId, ItemInstance, SlotLocation,
};
use crate::tags::{self, SkillKey, TagIssue, TagMap};

/// One durability hit applied to an instance.
///
/// `amount` is the wear actually absorbed after clamping, so a 5-point hit
/// on 2 remaining records 2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WearLoss {
    pub instance: InstanceId,
    pub amount: u32,
    pub remaining: Durability,
}

/// How a breakage resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakOutcome {
    /// The broken item degraded into this template.
    Replaced(TemplateId),
    /// No usable replacement; the item is simply gone.
    Removed,
}

/// Record of one instance breaking, with everything a host needs to
/// narrate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakageResolution {
    pub instance: InstanceId,
    /// Display name captured before retirement.
    pub item_name: String,
    pub outcome: BreakOutcome,
    /// Seats that held the item when it broke (normally one).
    pub affected: Vec<SlotLocation>,
    /// Whether the break happened mid-encounter.
    pub in_encounter: bool,
}

/// Everything that happened during one wear trigger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WearReport {
    pub losses: Vec<WearLoss>,
    pub breakages: Vec<BreakageResolution>,
    /// Malformed or unresolvable tag fragments found along the way.
    pub issues: Vec<TagIssue>,
}

impl WearReport {
    pub fn is_empty(&self) -> bool {
        self.losses.is_empty() && self.breakages.is_empty() && self.issues.is_empty()
    }
}

/// Durability initialization for a freshly minted instance.
///
/// The starting value is the `durability` tag, else the config default. An
/// unlimited start forces an unlimited maximum regardless of the
/// `max_durability` tag. Otherwise the maximum is the `max_durability` tag,
/// else the starting value itself (or the config default maximum when the
/// start is zero). A finite maximum below the start is lifted to the start.
pub(crate) fn initial_durability(tags: &TagMap, defaults: &ArmoryConfig) -> (Durability, Durability) {
    let durability = match tags.get(tags::DURABILITY) {
        Some(value) => {
            tags::parse_durability(tags::DURABILITY, value).unwrap_or(defaults.default_durability)
        }
        None => defaults.default_durability,
    };

    if durability.is_unlimited() {
        return (Durability::Unlimited, Durability::Unlimited);
    }

    let fallback = match durability {
        Durability::Finite(0) => defaults.default_max_durability,
        other => other,
    };
    let mut maximum = match tags.get(tags::MAX_DURABILITY) {
        Some(value) => tags::parse_durability(tags::MAX_DURABILITY, value).unwrap_or(fallback),
        None => fallback,
    };

    if maximum < durability {
        maximum = durability;
    }
    (durability, maximum)
}

/// Per-action wear for one instance, honoring `skill_loss` overrides.
///
/// The first entry matching the used skill wins: numeric keys compare
/// directly, name keys resolve through the skill oracle. Without a match
/// the `use_loss` tag applies, without that the config default.
fn action_wear_amount(
    env: &ArmoryEnv<'_>,
    instance: &ItemInstance,
    skill: SkillId,
    defaults: &ArmoryConfig,
    issues: &mut Vec<TagIssue>,
) -> Result<u32, OracleError> {
    let mut loss = match instance.tags.get(tags::USE_LOSS) {
        Some(value) => match tags::parse_amount(tags::USE_LOSS, value) {
            Ok(amount) => amount,
            Err(issue) => {
                issues.push(issue);
                defaults.default_use_loss
            }
        },
        None => defaults.default_use_loss,
    };

    if let Some(raw) = instance.tags.get(tags::SKILL_LOSS) {
        let table = tags::parse_skill_loss(raw);
        issues.extend(table.issues);
        for entry in table.entries {
            let matched = match &entry.key {
                SkillKey::Id(id) => *id == skill,
                SkillKey::Name(name) => match env.skills()?.find_by_name(name) {
                    Some(found) => found.id == skill,
                    None => {
                        issues.push(TagIssue::UnknownSkill {
                            segment: name.clone(),
                        });
                        false
                    }
                },
            };
            if matched {
                loss = entry.amount;
                break;
            }
        }
    }
    Ok(loss)
}

/// Resolves a `replacement` tag against the catalog.
///
/// Numeric values are template ids, anything else is a normalized name
/// lookup. Unresolvable values degrade to `None` (plain removal) and leave
/// an issue behind.
fn resolve_replacement(
    env: &ArmoryEnv<'_>,
    item_tags: &TagMap,
    issues: &mut Vec<TagIssue>,
) -> Option<TemplateId> {
    let raw = item_tags.get(tags::REPLACEMENT)?;
    let catalog = env.catalog().ok()?;
    if let Ok(id) = raw.trim().parse::<u32>() {
        let template = TemplateId(id);
        if catalog.template(template).is_some() {
            return Some(template);
        }
        issues.push(TagIssue::UnknownReplacement {
            value: raw.to_string(),
        });
        return None;
    }
    match catalog.find_by_name(raw) {
        Some(template) => Some(template.id),
        None => {
            issues.push(TagIssue::UnknownReplacement {
                value: raw.to_string(),
            });
            None
        }
    }
}

impl ArmoryState {
    /// Remaining durability of a live instance.
    pub fn durability(&self, id: InstanceId) -> Option<Durability> {
        self.registry.get(id).map(|instance| instance.durability)
    }

    /// Durability ceiling of a live instance.
    pub fn max_durability(&self, id: InstanceId) -> Option<Durability> {
        self.registry.get(id).map(|instance| instance.maximum)
    }

    /// Applies `amount` of wear to an instance.
    ///
    /// Returns `false` when the instance is unknown or unlimited, `true`
    /// when a finite instance took the hit. Depletion resolves before the
    /// call returns: the broken item is unseated or replaced and retired,
    /// so a later reduction for the same id reports `false`.
    pub fn reduce_durability(
        &mut self,
        env: &ArmoryEnv<'_>,
        id: InstanceId,
        amount: u32,
        report: &mut WearReport,
    ) -> bool {
        let after = {
            let Some(instance) = self.registry.get_mut(id) else {
                return false;
            };
            let before = match instance.durability {
                Durability::Unlimited => return false,
                Durability::Finite(value) => value,
            };
            let after = before.saturating_sub(amount);
            instance.durability = Durability::Finite(after);
            report.losses.push(WearLoss {
                instance: id,
                amount: before - after,
                remaining: Durability::Finite(after),
            });
            after
        };
        if after == 0 {
            self.handle_broken(env, id, report);
        }
        true
    }

    /// Applies action-use wear to everything `actor` has seated.
    ///
    /// Every seated individuated instance takes its own loss; ordinary
    /// template equipment is untouched. An unknown actor yields an empty
    /// report, since trigger delivery may race with roster changes.
    ///
    /// # Errors
    ///
    /// Fails only when a required oracle is missing from the environment.
    pub fn on_action_used(
        &mut self,
        env: &ArmoryEnv<'_>,
        actor: ActorId,
        skill: SkillId,
    ) -> Result<WearReport, OracleError> {
        let mut report = WearReport::default();
        let defaults = env.defaults()?;
        let equipped: Vec<InstanceId> = match self.roster.actor(actor) {
            Some(member) => member.equipped().filter_map(|item| item.as_instance()).collect(),
            None => return Ok(report),
        };
        for id in equipped {
            let loss = match self.registry.get(id) {
                Some(instance) => {
                    action_wear_amount(env, instance, skill, &defaults, &mut report.issues)?
                }
                None => continue,
            };
            if loss > 0 {
                self.reduce_durability(env, id, loss, &mut report);
            }
        }
        Ok(report)
    }

    /// Applies damage-taken wear to everything `actor` has seated.
    ///
    /// A hit of zero causes no wear at all. Per-item loss is the
    /// `damage_loss` tag, else the config default.
    ///
    /// # Errors
    ///
    /// Fails only when a required oracle is missing from the environment.
    pub fn on_damage_taken(
        &mut self,
        env: &ArmoryEnv<'_>,
        actor: ActorId,
        amount: u32,
    ) -> Result<WearReport, OracleError> {
        let mut report = WearReport::default();
        if amount == 0 {
            return Ok(report);
        }
        let defaults = env.defaults()?;
        let equipped: Vec<InstanceId> = match self.roster.actor(actor) {
            Some(member) => member.equipped().filter_map(|item| item.as_instance()).collect(),
            None => return Ok(report),
        };
        for id in equipped {
            let loss = match self.registry.get(id) {
                Some(instance) => match instance.tags.get(tags::DAMAGE_LOSS) {
                    Some(value) => match tags::parse_amount(tags::DAMAGE_LOSS, value) {
                        Ok(parsed) => parsed,
                        Err(issue) => {
                            report.issues.push(issue);
                            defaults.default_damage_loss
                        }
                    },
                    None => defaults.default_damage_loss,
                },
                None => continue,
            };
            if loss > 0 {
                self.reduce_durability(env, id, loss, &mut report);
            }
        }
        Ok(report)
    }

    /// Resolves a depleted instance.
    ///
    /// With a resolvable `replacement` tag every seat holding the item is
    /// force-swapped to the replacement template; otherwise every seat is
    /// cleared. Either way the instance retires before control returns, so
    /// no caller ever observes "zero durability but still registered".
    /// This path deliberately ignores the encounter lock.
    fn handle_broken(&mut self, env: &ArmoryEnv<'_>, id: InstanceId, report: &mut WearReport) {
        let (item_name, replacement) = match self.registry.get(id) {
            Some(instance) => (
                instance.name.clone(),
                resolve_replacement(env, &instance.tags, &mut report.issues),
            ),
            None => return,
        };

        let affected = self.roster.holders_of(id);
        let seat_with = replacement.map(EquipRef::Template);
        for location in &affected {
            self.force_equip(env, *location, seat_with);
        }
        self.retire(id);

        report.breakages.push(BreakageResolution {
            instance: id,
            item_name,
            outcome: match replacement {
                Some(template) => BreakOutcome::Replaced(template),
                None => BreakOutcome::Removed,
            },
            affected,
            in_encounter: self.session.in_encounter,
        });
    }

    /// Rewrites one seat without consulting the encounter lock.
    ///
    /// The displaced item returns to the pool and the incoming one is
    /// drawn from it saturating, so a replacement the party never owned is
    /// conjured rather than rejected. The seat takes a plain template
    /// reference; a unique replacement individuates again on its next
    /// ordinary equip.
    pub(crate) fn force_equip(
        &mut self,
        env: &ArmoryEnv<'_>,
        location: SlotLocation,
        item: Option<EquipRef>,
    ) {
        let displaced = {
            let Some(member) = self.roster.actor_mut(location.actor) else {
                return;
            };
            let Some(slot) = member.slots.get_mut(location.slot) else {
                return;
            };
            match item {
                Some(incoming) => slot.seat(incoming),
                None => slot.vacate(),
            }
        };
        if let Some(displaced) = displaced {
            self.party.gain(displaced, 1);
        }
        if let Some(incoming) = item {
            self.party.lose(incoming, 1);
        }
        self.refresh_actor(env, location.actor);
    }
}
