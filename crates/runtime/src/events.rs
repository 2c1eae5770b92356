//! Combat events the host reports to the session.
//!
//! Events represent high-level occurrences in the host's combat resolution
//! (an actor used a skill, an actor was hit). Hooks react to them to apply
//! equipment wear and other follow-up effects. Dispatch is synchronous and
//! single-threaded; ordering is whatever order the host reports.

use armory_core::{ActorId, SkillId};

/// High-level combat notifications fed into [`crate::session::Session::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    /// An actor completed an action with the given skill.
    ///
    /// Within one resolution step the host reports this before any
    /// [`CombatEvent::DamageTaken`] it caused.
    ActionUsed { actor: ActorId, skill: SkillId },

    /// An actor took a hit.
    DamageTaken {
        actor: ActorId,
        amount: u32,
        /// Who dealt the hit, when known.
        source: Option<ActorId>,
    },
}

impl CombatEvent {
    /// The actor this event is about.
    pub fn actor(&self) -> ActorId {
        match self {
            CombatEvent::ActionUsed { actor, .. } => *actor,
            CombatEvent::DamageTaken { actor, .. } => *actor,
        }
    }
}
