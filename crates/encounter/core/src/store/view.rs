use core::ops::Index;

use crate::combatant::{Combatant, CombatantId};
use crate::initiative::turn_order;

/// Combatants in turn order, borrowed from the store.
///
/// Built fresh from the stored collection every time it is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOrder<'a> {
    entries: Vec<&'a Combatant>,
}

impl<'a> TurnOrder<'a> {
    pub(crate) fn derive(combatants: &'a [Combatant]) -> Self {
        let entries = turn_order(combatants)
            .into_iter()
            .map(|index| &combatants[index])
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Combatant> + '_ {
        self.entries.iter().copied()
    }

    /// Ids in turn order.
    pub fn ids(&self) -> Vec<CombatantId> {
        self.entries.iter().map(|combatant| combatant.id).collect()
    }

    /// The combatant holding the turn, if any.
    pub fn active(&self) -> Option<&'a Combatant> {
        self.entries.iter().copied().find(|combatant| combatant.is_active)
    }

    /// Display position of a combatant.
    pub fn position(&self, id: CombatantId) -> Option<usize> {
        self.entries.iter().position(|combatant| combatant.id == id)
    }

    pub fn as_slice(&self) -> &[&'a Combatant] {
        &self.entries
    }

    /// Splits into allies and enemies, each keeping turn order.
    pub fn sides(&self) -> Sides<'a> {
        let (allies, enemies) = self
            .entries
            .iter()
            .copied()
            .partition(|combatant| combatant.is_player);
        Sides { allies, enemies }
    }
}

impl<'a> Index<usize> for TurnOrder<'a> {
    type Output = Combatant;

    fn index(&self, index: usize) -> &Self::Output {
        self.entries[index]
    }
}

impl<'a> IntoIterator for TurnOrder<'a> {
    type Item = &'a Combatant;
    type IntoIter = std::vec::IntoIter<&'a Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Display grouping by `is_player`. Has no effect on turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sides<'a> {
    pub allies: Vec<&'a Combatant>,
    pub enemies: Vec<&'a Combatant>,
}
