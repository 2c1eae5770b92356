//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use armory_core::ArmoryState;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
///
/// Stores snapshots indexed by slot for testing and local development.
pub struct InMemorySaveRepo {
    slots: RwLock<HashMap<u32, ArmoryState>>,
}

impl InMemorySaveRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create with an initial snapshot in slot 0.
    pub fn with_initial_state(initial_state: ArmoryState) -> Self {
        let mut slots = HashMap::new();
        slots.insert(0, initial_state);
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl Default for InMemorySaveRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn save(&self, slot: u32, state: &ArmoryState) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot, state.clone());
        Ok(())
    }

    fn load(&self, slot: u32) -> Result<Option<ArmoryState>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(&slot).cloned())
    }

    fn exists(&self, slot: u32) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(&slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: u32) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(&slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u32>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut occupied: Vec<u32> = slots.keys().copied().collect();
        occupied.sort_unstable();
        Ok(occupied)
    }
}
