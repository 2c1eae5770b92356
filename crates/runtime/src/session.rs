//! High-level session orchestrator.
//!
//! The session owns the equipment state and wires oracles, hooks, the
//! message sink, and an optional save repository into a single synchronous
//! API for hosts to drive.

use std::sync::Arc;

use armory_core::{ActorId, ArmoryState, EquipRef};
use tracing::debug;

use crate::api::{Result, RuntimeError};
use crate::events::CombatEvent;
use crate::hooks::HookRegistry;
use crate::message::{MessageSink, TracingSink};
use crate::oracle::OracleManager;
use crate::repository::SaveRepository;

/// Main session that orchestrates equipment bookkeeping for a host game.
///
/// Design: the session owns [`ArmoryState`] and routes every combat-driven
/// mutation through the hook registry, so wear and breakage stay auditable
/// from the dispatched events alone.
pub struct Session {
    state: ArmoryState,
    oracles: OracleManager,
    hooks: HookRegistry,
    sink: Arc<dyn MessageSink>,
    repository: Option<Arc<dyn SaveRepository>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Read access to the current equipment state.
    pub fn state(&self) -> &ArmoryState {
        &self.state
    }

    /// Mutable access for host-side roster management.
    ///
    /// Hosts use this to add roster members and slots; durability and
    /// loadout rules still go through the session API.
    pub fn state_mut(&mut self) -> &mut ArmoryState {
        &mut self.state
    }

    /// The oracle bundle this session reads content from.
    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Feeds one combat event through the hook registry.
    ///
    /// # Errors
    ///
    /// Fails only when a hook with `Critical` criticality fails; other hook
    /// failures are logged and absorbed.
    pub fn dispatch(&mut self, event: &CombatEvent) -> Result<()> {
        debug!(target: "runtime::session", event = ?event, "dispatching combat event");
        self.hooks
            .dispatch(event, &mut self.state, &self.oracles, self.sink.as_ref())
    }

    /// Equips `item` into `slot` of `actor`, or unequips with `None`.
    pub fn equip(&mut self, actor: ActorId, slot: usize, item: Option<EquipRef>) -> Result<()> {
        let env = self.oracles.as_armory_env();
        self.state.equip(&env, actor, slot, item)?;
        Ok(())
    }

    /// Adds `amount` units of `item` to party stock, individuating unique
    /// templates into fresh instances.
    pub fn acquire(&mut self, item: EquipRef, amount: u32) -> Result<Vec<EquipRef>> {
        let env = self.oracles.as_armory_env();
        Ok(self.state.acquire(&env, item, amount)?)
    }

    /// Removes `amount` units of `item` from party stock.
    pub fn discard(&mut self, item: EquipRef, amount: u32) {
        self.state.discard(item, amount);
    }

    /// Begins an encounter. Ordinary equipping locks until
    /// [`Session::end_encounter`].
    pub fn begin_encounter(&mut self) {
        self.state.begin_encounter();
    }

    pub fn end_encounter(&mut self) {
        self.state.end_encounter();
    }

    pub fn in_encounter(&self) -> bool {
        self.state.in_encounter()
    }

    /// Saves the current state into `slot` of the configured repository.
    ///
    /// # Errors
    ///
    /// Fails with `RepositoryNotSet` when the session was built without a
    /// repository, or with the repository's own error on write failure.
    pub fn save(&self, slot: u32) -> Result<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotSet)?;
        repository.save(slot, &self.state)?;
        Ok(())
    }

    /// Replaces the current state with the snapshot in `slot`.
    ///
    /// # Errors
    ///
    /// Fails with `RepositoryNotSet` when no repository is configured, or
    /// `EmptySlot` when the slot holds nothing.
    pub fn restore(&mut self, slot: u32) -> Result<()> {
        let repository = self
            .repository
            .as_ref()
            .ok_or(RuntimeError::RepositoryNotSet)?;
        let state = repository
            .load(slot)?
            .ok_or(RuntimeError::EmptySlot { slot })?;
        self.state = state;
        Ok(())
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    state: Option<ArmoryState>,
    oracles: Option<OracleManager>,
    hooks: Option<HookRegistry>,
    sink: Option<Arc<dyn MessageSink>>,
    repository: Option<Arc<dyn SaveRepository>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            state: None,
            oracles: None,
            hooks: None,
            sink: None,
            repository: None,
        }
    }

    /// Provide initial equipment state
    pub fn initial_state(mut self, state: ArmoryState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set custom event hooks.
    ///
    /// If not provided, the default hooks (Wear) are used. Use this to add
    /// custom hooks or replace the default set entirely.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Set the message sink (defaults to [`TracingSink`])
    pub fn sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the save repository (optional)
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the session
    pub fn build(self) -> Result<Session> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        Ok(Session {
            state: self.state.unwrap_or_default(),
            oracles,
            hooks: self.hooks.unwrap_or_default(),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            repository: self.repository,
        })
    }
}
