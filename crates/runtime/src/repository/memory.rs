//! In-memory [`SnapshotRepository`] for tests and ephemeral sessions.

use std::sync::Mutex;

use super::error::{RepositoryError, Result};
use super::migration::decode;
use super::save_data::SaveData;
use super::traits::SnapshotRepository;

/// Holds the encoded snapshot in memory.
///
/// Snapshots are kept as JSON bytes so loads go through the same decoding
/// path as files do.
#[derive(Debug, Default)]
pub struct InMemorySnapshotRepo {
    slot: Mutex<Option<Vec<u8>>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an already encoded document.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(bytes.into())),
        }
    }

    /// The encoded document, if any.
    pub fn raw(&self) -> Result<Option<Vec<u8>>> {
        let slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    /// Whether a snapshot is currently stored.
    pub fn is_saved(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, data: &SaveData) -> Result<()> {
        let bytes = data.to_json()?;
        let mut slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        let slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        slot.as_deref().map(decode).transpose()
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self.slot.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
