//! Snapshot persistence for the encounter.
//!
//! The store itself never touches storage. After each mutation the session
//! hands the current snapshot to a [`SnapshotRepository`]; on startup the
//! session restores whatever the repository holds, upgrading old layouts and
//! falling back to an empty encounter when the stored document is unusable.

mod error;
mod file;
mod memory;
mod migration;
mod save_data;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepo;
pub use migration::decode;
pub use save_data::{CURRENT_VERSION, SaveData};
pub use traits::SnapshotRepository;
