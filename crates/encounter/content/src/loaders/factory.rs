//! Content factory for loading every content file from a data directory.

use std::path::{Path, PathBuf};

use encounter_core::{Character, MonsterTemplate};

use crate::loaders::{BestiaryLoader, LoadResult, RosterLoader};

/// Content factory that loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── bestiary.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load monster records from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<Vec<(String, MonsterTemplate)>> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    /// Load player characters from `roster.ron`.
    ///
    /// A missing roster file is an empty roster.
    pub fn load_roster(&self) -> LoadResult<Vec<Character>> {
        let path = self.data_dir.join("roster.ron");
        if !path.exists() {
            tracing::debug!("No roster at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        RosterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let bestiary = factory.load_bestiary().unwrap();
        assert!(bestiary.iter().any(|(id, _)| id == "goblin"));

        let roster = factory.load_roster().unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|c| c.to_new_combatant().validate().is_ok()));
    }

    #[test]
    fn missing_roster_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_roster().unwrap().is_empty());
        assert!(factory.load_bestiary().is_err());
    }
}
