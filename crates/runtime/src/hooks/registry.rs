//! Hook registry for managing and dispatching event hooks.

use std::sync::Arc;

use armory_core::ArmoryState;
use tracing::{debug, error};

use crate::api::{Result, RuntimeError};
use crate::events::CombatEvent;
use crate::message::MessageSink;
use crate::oracle::OracleManager;

use super::{EventHook, HookCriticality, WearHook};

/// Registry that manages and dispatches event hooks.
///
/// Hooks are sorted by priority at construction (lower values first) and
/// evaluated in that order for every dispatched event. Failures are handled
/// according to each hook's declared criticality.
pub struct HookRegistry {
    hooks: Vec<Arc<dyn EventHook>>,
}

impl HookRegistry {
    /// Creates a new registry from the given hooks.
    ///
    /// Hooks are automatically sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn EventHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self { hooks }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks:
    /// - WearHook: applies equipment wear and resolves breakage
    pub fn default_hooks() -> Self {
        Self::new(vec![Arc::new(WearHook) as Arc<dyn EventHook>])
    }

    /// Evaluates all hooks for one event, in priority order.
    ///
    /// # Error Handling
    ///
    /// Hook failures are handled based on criticality level:
    /// - `Critical`: returns the error immediately, failing the dispatch
    /// - `Important`: logs the error and continues to the next hook (default)
    /// - `Optional`: logs at debug level and continues silently
    pub fn dispatch(
        &self,
        event: &CombatEvent,
        state: &mut ArmoryState,
        oracles: &OracleManager,
        sink: &dyn MessageSink,
    ) -> Result<()> {
        let env = oracles.as_armory_env();

        for hook in self.hooks.iter() {
            if !hook.should_trigger(event, state) {
                continue;
            }
            if let Err(e) = hook.apply(event, state, &env, sink) {
                self.handle_hook_error(hook.as_ref(), e)?;
            }
        }

        Ok(())
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Handles hook failures based on criticality level.
    ///
    /// Returns Ok(()) for Important/Optional hooks, Err for Critical hooks.
    fn handle_hook_error(&self, hook: &dyn EventHook, error: RuntimeError) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = ?error,
                    "Critical hook failed, aborting dispatch"
                );
                Err(error)
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = ?error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    error = ?error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}
