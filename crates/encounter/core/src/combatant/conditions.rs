//! Status-effect tags carried by combatants.
//!
//! Conditions are a plain set: no duration, no stacking, no ordering. The set
//! is stored as bitflags so duplicates cannot exist by construction.

use bitflags::bitflags;

/// A single status-effect tag.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Exhaustion,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    /// The bit representing this condition in a [`ConditionSet`].
    pub const fn flag(self) -> ConditionSet {
        match self {
            Self::Blinded => ConditionSet::BLINDED,
            Self::Charmed => ConditionSet::CHARMED,
            Self::Deafened => ConditionSet::DEAFENED,
            Self::Exhaustion => ConditionSet::EXHAUSTION,
            Self::Frightened => ConditionSet::FRIGHTENED,
            Self::Grappled => ConditionSet::GRAPPLED,
            Self::Incapacitated => ConditionSet::INCAPACITATED,
            Self::Invisible => ConditionSet::INVISIBLE,
            Self::Paralyzed => ConditionSet::PARALYZED,
            Self::Petrified => ConditionSet::PETRIFIED,
            Self::Poisoned => ConditionSet::POISONED,
            Self::Prone => ConditionSet::PRONE,
            Self::Restrained => ConditionSet::RESTRAINED,
            Self::Stunned => ConditionSet::STUNNED,
            Self::Unconscious => ConditionSet::UNCONSCIOUS,
        }
    }
}

bitflags! {
    /// Set of conditions currently applied to a combatant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConditionSet: u16 {
        const BLINDED       = 1 << 0;
        const CHARMED       = 1 << 1;
        const DEAFENED      = 1 << 2;
        const EXHAUSTION    = 1 << 3;
        const FRIGHTENED    = 1 << 4;
        const GRAPPLED      = 1 << 5;
        const INCAPACITATED = 1 << 6;
        const INVISIBLE     = 1 << 7;
        const PARALYZED     = 1 << 8;
        const PETRIFIED     = 1 << 9;
        const POISONED      = 1 << 10;
        const PRONE         = 1 << 11;
        const RESTRAINED    = 1 << 12;
        const STUNNED       = 1 << 13;
        const UNCONSCIOUS   = 1 << 14;
    }
}

impl ConditionSet {
    pub fn has(&self, condition: Condition) -> bool {
        self.contains(condition.flag())
    }

    /// Flips a condition and returns whether it is now present.
    pub fn flip(&mut self, condition: Condition) -> bool {
        self.toggle(condition.flag());
        self.has(condition)
    }

    /// Iterates the present conditions in declaration order.
    pub fn conditions(&self) -> impl Iterator<Item = Condition> + '_ {
        use strum::IntoEnumIterator;
        Condition::iter().filter(|condition| self.has(*condition))
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, condition| set | condition.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_adds_then_removes() {
        let mut set = ConditionSet::empty();
        assert!(set.flip(Condition::Prone));
        assert!(set.has(Condition::Prone));
        assert!(!set.flip(Condition::Prone));
        assert!(set.is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let set: ConditionSet = [Condition::Poisoned, Condition::Poisoned, Condition::Blinded]
            .into_iter()
            .collect();
        assert_eq!(
            set.conditions().collect::<Vec<_>>(),
            vec![Condition::Blinded, Condition::Poisoned]
        );
    }

    #[test]
    fn every_condition_has_a_distinct_bit() {
        use strum::IntoEnumIterator;
        let all: ConditionSet = Condition::iter().collect();
        assert_eq!(all.bits().count_ones() as usize, Condition::iter().count());
        assert_eq!(all, ConditionSet::all());
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("unconscious".parse::<Condition>(), Ok(Condition::Unconscious));
        assert_eq!(Condition::Incapacitated.to_string(), "incapacitated");
    }
}
