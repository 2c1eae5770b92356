//! Event hook system for runtime orchestration.
//!
//! Hooks subscribe to combat events reported by the host and apply follow-up
//! effects to the equipment state. The wear hook is the canonical example:
//! it turns "actor used skill" and "actor was hit" notifications into
//! durability loss and breakage resolution.
//!
//! # Architecture
//!
//! - Hooks are registered in the SessionBuilder and sorted by priority
//! - On each dispatched event, hooks are evaluated in priority order
//! - Hook failures are handled according to their declared criticality

mod durability;
mod registry;

pub use durability::WearHook;
pub use registry::HookRegistry;

use armory_core::{ArmoryEnv, ArmoryState};

use crate::api::Result;
use crate::events::CombatEvent;
use crate::message::MessageSink;

/// Defines the criticality level of a hook for error handling.
///
/// This enum determines how hook failures are handled during dispatch:
/// - Critical hooks must succeed or the dispatch fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure should fail the entire dispatch.
    ///
    /// Use for hooks that maintain state consistency. If a critical hook
    /// fails, the error propagates to the caller.
    Critical,

    /// Hook failure should be logged as error but allow continuation.
    ///
    /// This is the default level. Use for hooks with side effects that
    /// are not essential for state consistency.
    Important,

    /// Hook failure is expected and can be silently ignored.
    ///
    /// Use for cosmetic effects that don't impact gameplay (message
    /// formatting, achievement notifications).
    Optional,
}

/// Subscriber that reacts to a dispatched combat event.
///
/// Hooks follow the Strategy pattern, allowing different behaviors to be
/// composed at session build time. Each hook inspects the event and
/// optionally mutates the equipment state through core operations.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: critical system hooks
/// - Zero: default priority for most hooks
/// - Positive priorities: optional or cosmetic hooks
pub trait EventHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Returns the execution priority. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the criticality level of this hook for error handling.
    ///
    /// - `Critical`: Hook failure fails the whole dispatch
    /// - `Important`: Hook failure is logged but dispatch continues (default)
    /// - `Optional`: Hook failure is silently ignored
    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Determines whether this hook should run for the given event.
    ///
    /// Called for every dispatched event. Keep this cheap; `apply` does the
    /// real work.
    fn should_trigger(&self, event: &CombatEvent, state: &ArmoryState) -> bool;

    /// Applies this hook's effect to the state.
    ///
    /// Runs only when [`EventHook::should_trigger`] returned true. Messages
    /// intended for the player go through `sink`.
    fn apply(
        &self,
        event: &CombatEvent,
        state: &mut ArmoryState,
        env: &ArmoryEnv<'_>,
        sink: &dyn MessageSink,
    ) -> Result<()>;
}
