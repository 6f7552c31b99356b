//! Roster records and the read-only bestiary interface.
//!
//! Characters and monsters live outside the encounter. The encounter only
//! keeps a reference (`entity_id`) to the record a combatant was created
//! from. The [`BestiaryOracle`] trait lets hosts supply monster records by
//! definition id (e.g., "goblin", "owlbear") without the core knowing where
//! they come from.

use crate::combatant::NewCombatant;
use crate::config::EncounterConfig;
use crate::error::{EncounterError, ErrorSeverity};

/// Ability modifier for an ability score: `floor((score - 10) / 2)`.
pub const fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A player character on the campaign roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u8,
    pub armor_class: i32,
    pub max_hp: i32,
    pub dex_modifier: i32,
}

#[cfg(feature = "serde")]
fn default_level() -> u8 {
    1
}

impl Character {
    /// Insertion record for this character, at full health.
    pub fn to_new_combatant(&self) -> NewCombatant {
        NewCombatant::character(&self.id, &self.name, self.armor_class, self.max_hp)
            .with_dex_modifier(self.dex_modifier)
    }
}

/// A monster entry from the bestiary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub armor_class: i32,
    pub hit_points: i32,
    /// Raw DEX ability score (e.g., 14), not the modifier.
    pub dexterity: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub challenge_rating: Option<String>,
}

impl MonsterTemplate {
    /// DEX modifier clamped into the encounter's accepted range.
    pub fn dex_modifier(&self) -> i32 {
        ability_modifier(self.dexterity).clamp(
            EncounterConfig::DEX_MODIFIER_MIN,
            EncounterConfig::DEX_MODIFIER_MAX,
        )
    }

    /// Insertion record for one instance of this monster.
    ///
    /// `name` is the already disambiguated display name.
    pub fn to_new_combatant(&self, def_id: &str, name: impl Into<String>) -> NewCombatant {
        NewCombatant::monster(def_id, name, self.armor_class, self.hit_points)
            .with_dex_modifier(self.dex_modifier())
    }
}

/// Read-only access to monster records.
pub trait BestiaryOracle: Send + Sync {
    /// Look up a monster by definition id.
    fn template(&self, def_id: &str) -> Option<MonsterTemplate>;

    /// All known definition ids.
    fn all_ids(&self) -> Vec<String>;

    /// Like [`template`](Self::template) but failing with [`OracleError`].
    fn require(&self, def_id: &str) -> Result<MonsterTemplate, OracleError> {
        self.template(def_id)
            .ok_or_else(|| OracleError::MonsterNotFound(def_id.to_owned()))
    }
}

/// Errors that occur when accessing roster data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Monster definition was not found by id.
    #[error("monster template '{0}' not found")]
    MonsterNotFound(String),

    /// Character was not found on the roster.
    #[error("character '{0}' not found")]
    CharacterNotFound(String),
}

impl EncounterError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MonsterNotFound(_) => "ORACLE_MONSTER_NOT_FOUND",
            Self::CharacterNotFound(_) => "ORACLE_CHARACTER_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantKind;

    #[test]
    fn ability_modifier_floors() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn monster_record_becomes_enemy_combatant() {
        let goblin = MonsterTemplate {
            name: "Goblin".into(),
            armor_class: 15,
            hit_points: 7,
            dexterity: 14,
            challenge_rating: Some("1/4".into()),
        };
        let record = goblin.to_new_combatant("goblin", "Goblin 2");
        assert_eq!(record.kind, CombatantKind::Monster);
        assert_eq!(record.name, "Goblin 2");
        assert_eq!(record.dex_modifier, 2);
        assert!(!record.is_player);
        assert_eq!(record.validate(), Ok(()));
    }

    #[test]
    fn character_record_becomes_ally_combatant() {
        let aria = Character {
            id: "pc-aria".into(),
            name: "Aria".into(),
            player: Some("Sam".into()),
            level: 3,
            armor_class: 16,
            max_hp: 24,
            dex_modifier: 3,
        };
        let record = aria.to_new_combatant();
        assert_eq!(record.kind, CombatantKind::Character);
        assert!(record.is_player);
        assert_eq!(record.entity_id, "pc-aria");
    }
}
