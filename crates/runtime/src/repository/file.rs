//! File-based [`SnapshotRepository`] implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::migration::decode;
use super::save_data::SaveData;
use super::traits::SnapshotRepository;

/// Stores the snapshot as `{session_id}.json` under a base directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Clone, Debug)]
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    /// Create the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, session_id: &str) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(format!("{session_id}.json")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, data: &SaveData) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let bytes = data.to_json()?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved encounter snapshot to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let data = decode(&bytes)?;

        tracing::debug!("Loaded encounter snapshot from {}", self.path.display());
        Ok(Some(data))
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Deleted encounter snapshot {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(RepositoryError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{EncounterStore, NewCombatant};

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("saves"), "table-1").unwrap();
        assert!(repo.load().unwrap().is_none());

        let mut store = EncounterStore::new();
        store.add_combatant(NewCombatant::monster("orc", "Orc", 13, 15).with_initiative(12));
        let data = SaveData::new(store.into_snapshot(), Vec::new());
        repo.save(&data).unwrap();

        assert_eq!(repo.load().unwrap(), Some(data));
        assert!(!repo.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupted_file_recovers_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path(), "broken").unwrap();
        fs::write(repo.path(), b"{ not json").unwrap();

        assert!(repo.load().is_err());
        assert_eq!(repo.load_or_default(), SaveData::default());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path(), "gone").unwrap();
        repo.save(&SaveData::default()).unwrap();
        repo.delete().unwrap();
        repo.delete().unwrap();
        assert!(repo.load().unwrap().is_none());
    }
}
