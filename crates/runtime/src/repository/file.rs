//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use armory_core::ArmoryState;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// Stores snapshots as individual bincode files indexed by slot.
///
/// # File Format
///
/// Snapshots are stored as `save_{slot}.bin` in bincode format for:
/// - Compact size
/// - Fast serialization/deserialization
/// - Support for complex types (maps with non-string keys)
///
/// Writes go through a temp file and an atomic rename, so a crash mid-save
/// never leaves a truncated slot behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: u32) -> PathBuf {
        self.base_dir.join(format!("save_{}.bin", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: u32, state: &ArmoryState) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot[{}] to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: u32) -> Result<Option<ArmoryState>> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let state: ArmoryState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded slot[{}] from {}", slot, path.display());

        Ok(Some(state))
    }

    fn exists(&self, slot: u32) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: u32) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot[{}]", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u32>> {
        let mut slots = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot_str) = filename
                    .strip_prefix("save_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(slot) = slot_str.parse::<u32>()
            {
                slots.push(slot);
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_core::{ActorId, ActorLoadout, EquipKind, EquipRef, TemplateId};

    fn sample_state() -> ArmoryState {
        let mut state = ArmoryState::new();
        state.party.gain(EquipRef::Template(TemplateId(3)), 4);
        state
            .roster
            .add(ActorLoadout::new(ActorId(1), "Rei"))
            .unwrap();
        state
            .roster
            .actor_mut(ActorId(1))
            .unwrap()
            .add_slot(EquipKind::Weapon)
            .unwrap();
        state.begin_encounter();
        state
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let state = sample_state();

        repo.save(7, &state).unwrap();
        assert!(repo.exists(7));

        let loaded = repo.load(7).unwrap().unwrap();
        assert_eq!(loaded, state);

        assert!(repo.load(8).unwrap().is_none());
    }

    #[test]
    fn list_and_delete_slots() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let state = sample_state();

        repo.save(2, &state).unwrap();
        repo.save(0, &state).unwrap();
        repo.save(5, &state).unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec![0, 2, 5]);

        repo.delete(2).unwrap();
        assert!(!repo.exists(2));
        assert_eq!(repo.list_slots().unwrap(), vec![0, 5]);

        // Deleting an empty slot is a no-op.
        repo.delete(2).unwrap();
    }
}
