//! Repository contracts for saving and loading equipment state.

use armory_core::ArmoryState;

use super::error::Result;

/// Repository for equipment state persistence.
///
/// This is for DYNAMIC data that changes during play:
/// - Save/load the full armory snapshot indexed by slot
/// - The snapshot includes the instance id allocator, so identity and
///   id monotonicity survive a save/load round trip
pub trait SaveRepository: Send + Sync {
    /// Save a snapshot into a slot
    fn save(&self, slot: u32, state: &ArmoryState) -> Result<()>;

    /// Load a snapshot from a slot
    fn load(&self, slot: u32) -> Result<Option<ArmoryState>>;

    /// Check if a slot is occupied
    fn exists(&self, slot: u32) -> bool;

    /// Delete a slot
    fn delete(&self, slot: u32) -> Result<()>;

    /// List all occupied slots
    fn list_slots(&self) -> Result<Vec<u32>> {
        Ok(vec![])
    }
}
