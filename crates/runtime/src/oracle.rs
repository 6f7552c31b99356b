//! Bestiary oracle implementing [`encounter_core::BestiaryOracle`].

use std::collections::HashMap;

use encounter_core::{BestiaryOracle, MonsterTemplate};

/// Oracle providing monster templates by definition id.
#[derive(Clone, Debug, Default)]
pub struct BestiaryOracleImpl {
    templates: HashMap<String, MonsterTemplate>,
}

impl BestiaryOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a monster template.
    ///
    /// * `id` - Definition ID (e.g., "goblin", "owlbear")
    pub fn add(&mut self, id: impl Into<String>, template: MonsterTemplate) {
        self.templates.insert(id.into(), template);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<(String, MonsterTemplate)> for BestiaryOracleImpl {
    fn from_iter<I: IntoIterator<Item = (String, MonsterTemplate)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

impl BestiaryOracle for BestiaryOracleImpl {
    fn template(&self, def_id: &str) -> Option<MonsterTemplate> {
        self.templates.get(def_id).cloned()
    }

    fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.templates.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::OracleError;

    fn wolf() -> MonsterTemplate {
        MonsterTemplate {
            name: "Wolf".into(),
            armor_class: 13,
            hit_points: 11,
            dexterity: 15,
            challenge_rating: Some("1/4".into()),
        }
    }

    #[test]
    fn looks_up_by_definition_id() {
        let oracle: BestiaryOracleImpl = [("wolf".to_owned(), wolf())].into_iter().collect();
        assert_eq!(oracle.template("wolf"), Some(wolf()));
        assert_eq!(oracle.all_ids(), vec!["wolf".to_owned()]);
        assert_eq!(
            oracle.require("dragon"),
            Err(OracleError::MonsterNotFound("dragon".into()))
        );
    }
}
