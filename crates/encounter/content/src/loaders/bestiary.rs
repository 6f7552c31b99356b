//! Bestiary loader.
//!
//! Loads monster records from RON files keyed by definition id.

use std::collections::HashSet;
use std::path::Path;

use encounter_core::MonsterTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for the bestiary from RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    /// Load the bestiary from a RON file.
    ///
    /// RON format: `Vec<(String, MonsterTemplate)>`
    ///
    /// ```ron
    /// [
    ///     ("goblin", (name: "Goblin", armor_class: 15, hit_points: 7, dexterity: 14)),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<Vec<(String, MonsterTemplate)>> {
        let content = read_file(path)?;
        let monsters = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        tracing::debug!("Loaded {} monsters from {}", monsters.len(), path.display());
        Ok(monsters)
    }

    /// Parse bestiary RON text.
    ///
    /// Duplicate ids and records that could never be inserted (HP below 1,
    /// armor class outside 1..=30) are rejected.
    pub fn parse(content: &str) -> LoadResult<Vec<(String, MonsterTemplate)>> {
        let monsters: Vec<(String, MonsterTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        let mut seen = HashSet::new();
        for (def_id, template) in &monsters {
            if !seen.insert(def_id.clone()) {
                anyhow::bail!("Duplicate monster id '{}' in bestiary", def_id);
            }
            template
                .to_new_combatant(def_id, &template.name)
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid monster '{}': {}", def_id, e))?;
        }

        Ok(monsters)
    }
}
