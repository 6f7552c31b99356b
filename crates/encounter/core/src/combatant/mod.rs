//! Combatant records tracked by an encounter.
//!
//! A [`Combatant`] is one participant's combat-instance record. It is pure
//! data plus a handful of derived queries; every mutation goes through the
//! [`EncounterStore`](crate::store::EncounterStore) so invariants are checked
//! in one place.
mod conditions;
mod validation;

use std::fmt;

use chrono::{DateTime, Utc};

pub use conditions::{Condition, ConditionSet};
pub use validation::ValidationError;

/// Unique identifier of a combatant within an encounter.
///
/// Allocated by the store on insertion and never reused, even after removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of a combatant: a roster character or a bestiary monster.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatantKind {
    Character,
    Monster,
}

/// One participant in the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,

    /// Key of the roster record this combatant was created from.
    /// Not owned by the encounter.
    pub entity_id: String,

    pub kind: CombatantKind,

    /// Display name, already disambiguated by the caller ("Goblin 2").
    pub name: String,

    pub armor_class: i32,
    pub max_hp: i32,

    /// Always within `0..=max_hp` once the store has touched the record.
    pub current_hp: i32,

    pub initiative: i32,

    /// Initiative tie-break and input to initiative rolls.
    pub dex_modifier: i32,

    /// Holds the current turn. At most one combatant per encounter.
    pub is_active: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: ConditionSet,

    /// Allies vs enemies for display grouping. No effect on ordering.
    pub is_player: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,

    pub added_at: DateTime<Utc>,
}

impl Combatant {
    /// Returns true when the combatant has no hit points left.
    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// Returns true at or below half of maximum hit points.
    pub fn is_bloodied(&self) -> bool {
        i64::from(self.current_hp) * 2 <= i64::from(self.max_hp)
    }

    /// Current hit points as a rounded percentage of the maximum.
    ///
    /// Returns 0 when `max_hp` is zero (only reachable through untrusted
    /// snapshots).
    pub fn hp_percentage(&self) -> i32 {
        if self.max_hp == 0 {
            return 0;
        }
        (f64::from(self.current_hp) / f64::from(self.max_hp) * 100.0).round() as i32
    }

    /// Clamps hit points into `0..=max_hp`.
    pub(crate) fn clamp_hp(&mut self) {
        self.current_hp = clamp_hp(self.current_hp, self.max_hp);
    }
}

/// Clamps a hit point value into `0..=max_hp`.
///
/// A non-positive maximum collapses the range to zero.
pub(crate) fn clamp_hp(hp: i32, max_hp: i32) -> i32 {
    hp.clamp(0, max_hp.max(0))
}

/// Insertion payload for [`EncounterStore::add_combatant`](crate::store::EncounterStore::add_combatant).
///
/// Carries everything except the fields the store assigns (`id`, `added_at`,
/// `is_active`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewCombatant {
    pub entity_id: String,
    pub kind: CombatantKind,
    pub name: String,
    pub armor_class: i32,
    pub max_hp: i32,
    /// Starting hit points; `None` means full health.
    pub current_hp: Option<i32>,
    pub initiative: i32,
    pub dex_modifier: i32,
    pub conditions: ConditionSet,
    pub is_player: bool,
    pub notes: Option<String>,
}

impl NewCombatant {
    /// Creates a player-side record for a roster character.
    pub fn character(
        entity_id: impl Into<String>,
        name: impl Into<String>,
        armor_class: i32,
        max_hp: i32,
    ) -> Self {
        Self::new(CombatantKind::Character, entity_id, name, armor_class, max_hp)
    }

    /// Creates an enemy-side record for a bestiary monster.
    pub fn monster(
        entity_id: impl Into<String>,
        name: impl Into<String>,
        armor_class: i32,
        max_hp: i32,
    ) -> Self {
        Self::new(CombatantKind::Monster, entity_id, name, armor_class, max_hp)
    }

    fn new(
        kind: CombatantKind,
        entity_id: impl Into<String>,
        name: impl Into<String>,
        armor_class: i32,
        max_hp: i32,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            kind,
            name: name.into(),
            armor_class,
            max_hp,
            current_hp: None,
            initiative: 0,
            dex_modifier: 0,
            conditions: ConditionSet::empty(),
            is_player: kind == CombatantKind::Character,
            notes: None,
        }
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_dex_modifier(mut self, dex_modifier: i32) -> Self {
        self.dex_modifier = dex_modifier;
        self
    }

    pub fn with_current_hp(mut self, current_hp: i32) -> Self {
        self.current_hp = Some(current_hp);
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Overrides the ally/enemy grouping derived from the kind.
    pub fn player_side(mut self, is_player: bool) -> Self {
        self.is_player = is_player;
        self
    }

    /// Materializes the record. HP is clamped, nothing else is re-checked.
    pub(crate) fn into_combatant(self, id: CombatantId, added_at: DateTime<Utc>) -> Combatant {
        let mut combatant = Combatant {
            id,
            entity_id: self.entity_id,
            kind: self.kind,
            name: self.name,
            armor_class: self.armor_class,
            max_hp: self.max_hp,
            current_hp: self.current_hp.unwrap_or(self.max_hp),
            initiative: self.initiative,
            dex_modifier: self.dex_modifier,
            is_active: false,
            conditions: self.conditions,
            is_player: self.is_player,
            notes: self.notes,
            added_at,
        };
        combatant.clamp_hp();
        combatant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin(current_hp: i32, max_hp: i32) -> Combatant {
        NewCombatant::monster("goblin", "Goblin", 15, max_hp)
            .with_current_hp(current_hp)
            .into_combatant(CombatantId(1), Utc::now())
    }

    #[test]
    fn defeated_at_zero_hp() {
        assert!(goblin(0, 7).is_defeated());
        assert!(!goblin(1, 7).is_defeated());
    }

    #[test]
    fn bloodied_at_half_or_below() {
        assert!(goblin(5, 10).is_bloodied());
        assert!(!goblin(6, 10).is_bloodied());
        // 3 <= 3.5
        assert!(goblin(3, 7).is_bloodied());
        assert!(!goblin(4, 7).is_bloodied());
    }

    #[test]
    fn hp_percentage_rounds_to_nearest() {
        assert_eq!(goblin(7, 7).hp_percentage(), 100);
        assert_eq!(goblin(1, 3).hp_percentage(), 33);
        assert_eq!(goblin(2, 3).hp_percentage(), 67);
        assert_eq!(goblin(0, 3).hp_percentage(), 0);
    }

    #[test]
    fn hp_percentage_is_zero_without_maximum() {
        let mut combatant = goblin(5, 5);
        combatant.max_hp = 0;
        assert_eq!(combatant.hp_percentage(), 0);
    }

    #[test]
    fn materializing_clamps_starting_hp() {
        assert_eq!(goblin(40, 7).current_hp, 7);
        assert_eq!(goblin(-3, 7).current_hp, 0);

        let full = NewCombatant::character("pc-1", "Aria", 16, 24)
            .into_combatant(CombatantId(2), Utc::now());
        assert_eq!(full.current_hp, 24);
        assert!(full.is_player);
        assert!(!full.is_active);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Monster".parse::<CombatantKind>(), Ok(CombatantKind::Monster));
        assert_eq!(CombatantKind::Character.to_string(), "character");
    }
}
