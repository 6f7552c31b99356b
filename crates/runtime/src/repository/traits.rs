//! Repository contract for saving and loading the encounter.

use super::error::Result;
use super::save_data::SaveData;

/// Storage for one session's snapshot.
pub trait SnapshotRepository: Send + Sync {
    /// Replace the stored snapshot.
    fn save(&self, data: &SaveData) -> Result<()>;

    /// Load the stored snapshot, upgraded to the current layout.
    ///
    /// `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>>;

    /// Remove the stored snapshot. Removing nothing is not an error.
    fn delete(&self) -> Result<()>;

    /// Like [`load`](Self::load), but an absent or unreadable snapshot yields
    /// the empty encounter. Failures are logged, never returned.
    fn load_or_default(&self) -> SaveData {
        match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => SaveData::default(),
            Err(err) => {
                tracing::warn!("Discarding unreadable encounter snapshot: {}", err);
                SaveData::default()
            }
        }
    }
}
