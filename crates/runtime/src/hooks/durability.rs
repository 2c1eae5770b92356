//! Hook that turns combat events into equipment wear.

use armory_core::{ArmoryEnv, ArmoryState, WearReport};
use tracing::{debug, info, warn};

use crate::api::Result;
use crate::events::CombatEvent;
use crate::message::MessageSink;

use super::{EventHook, HookCriticality};

/// Applies durability loss for every combat event and resolves breakage.
///
/// This is the subscriber that connects host combat resolution to the
/// durability ledger. It does not decide how much wear to apply; that
/// lives in the core (tag overrides, config defaults). The hook's job is
/// routing: call the right ledger trigger, log what happened, and announce
/// breakage to the player.
///
/// # Example Flow
///
/// ```text
/// Rei casts Fireblast
///   → host dispatches ActionUsed { actor: rei, skill: fireblast }
///   → ledger wears every individuated item Rei has seated
///   → Iron Sword durability hits 0 and breaks
///   → replacement seated or slot emptied, instance retired
///   → "Rei's Iron Sword broke!" published to the MessageSink
/// ```
///
/// Breakage announcements follow the encounter convention: they are only
/// published for breaks that happen mid-encounter, matching a battle log.
/// Every break is traced regardless.
#[derive(Debug, Clone, Copy)]
pub struct WearHook;

impl WearHook {
    fn report_wear(&self, report: &WearReport, state: &ArmoryState, sink: &dyn MessageSink) {
        for loss in &report.losses {
            debug!(
                target: "runtime::hooks",
                instance = %loss.instance,
                amount = loss.amount,
                remaining = %loss.remaining,
                "equipment wear"
            );
        }

        for issue in &report.issues {
            warn!(target: "runtime::hooks", %issue, "malformed wear tag ignored");
        }

        for breakage in &report.breakages {
            info!(
                target: "runtime::hooks",
                instance = %breakage.instance,
                item = %breakage.item_name,
                outcome = ?breakage.outcome,
                "equipment broke"
            );

            if !breakage.in_encounter {
                continue;
            }
            for location in &breakage.affected {
                if let Some(member) = state.roster.actor(location.actor) {
                    sink.publish(&format!("{}'s {} broke!", member.name, breakage.item_name));
                }
            }
        }
    }
}

impl EventHook for WearHook {
    fn name(&self) -> &'static str {
        "wear"
    }

    fn priority(&self) -> i32 {
        0 // Standard priority
    }

    fn criticality(&self) -> HookCriticality {
        // Important: a failed wear pass leaves items unworn but the
        // equipment state itself stays consistent.
        HookCriticality::Important
    }

    fn should_trigger(&self, event: &CombatEvent, state: &ArmoryState) -> bool {
        // Only actors with something seated can wear anything out.
        state
            .roster
            .actor(event.actor())
            .is_some_and(|member| member.equipped().next().is_some())
    }

    fn apply(
        &self,
        event: &CombatEvent,
        state: &mut ArmoryState,
        env: &ArmoryEnv<'_>,
        sink: &dyn MessageSink,
    ) -> Result<()> {
        let report = match *event {
            CombatEvent::ActionUsed { actor, skill } => {
                state.on_action_used(env, actor, skill)?
            }
            CombatEvent::DamageTaken { actor, amount, .. } => {
                state.on_damage_taken(env, actor, amount)?
            }
        };

        self.report_wear(&report, state, sink);
        Ok(())
    }
}
