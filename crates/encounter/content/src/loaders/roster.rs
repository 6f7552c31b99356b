//! Character roster loader.

use std::path::Path;

use encounter_core::Character;

use crate::loaders::{LoadResult, read_file};

/// Loader for the campaign roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file.
    ///
    /// RON format: `Vec<Character>`
    pub fn load(path: &Path) -> LoadResult<Vec<Character>> {
        let content = read_file(path)?;
        let characters: Vec<Character> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        tracing::debug!(
            "Loaded {} characters from {}",
            characters.len(),
            path.display()
        );
        Ok(characters)
    }
}
