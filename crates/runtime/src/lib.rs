//! Runtime services around the encounter store.
//!
//! The core crate owns the combat rules. This crate supplies everything a
//! frontend needs to drive them: a lock-guarded [`EncounterSession`],
//! snapshot persistence with versioned migration, an entropy-seeded RNG,
//! bestiary oracles, environment configuration and logging setup.
pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod repository;
pub mod rng;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use oracle::BestiaryOracleImpl;
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SaveData, SnapshotRepository,
};
pub use rng::EntropyRng;
pub use session::EncounterSession;
