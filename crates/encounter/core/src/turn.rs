//! Active-turn tracking and turn advancement.
//!
//! The cursor decides *who acts*; the initiative comparator decides *in what
//! order*. Keeping the two apart means the skip-defeated rule lives in
//! exactly one place: a defeated combatant is never made active by
//! [`TurnCursor::activate_first`] or [`TurnCursor::advance`] while anyone is
//! still standing.

use crate::combatant::{Combatant, CombatantId};
use crate::config::EncounterConfig;
use crate::initiative::turn_order;

/// Observable state of the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Empty encounter, everyone defeated, or combat not started.
    NoActive,
    ActiveOn(CombatantId),
}

/// Turn cursor over a borrowed combatant collection and round counter.
///
/// The cursor holds no state of its own: the active marker is the
/// `is_active` flag on the combatants and the order is re-derived from the
/// initiative comparator on every call.
pub struct TurnCursor<'a> {
    combatants: &'a mut [Combatant],
    round: &'a mut u32,
}

impl<'a> TurnCursor<'a> {
    pub fn new(combatants: &'a mut [Combatant], round: &'a mut u32) -> Self {
        Self { combatants, round }
    }

    /// Returns the current state.
    ///
    /// If several flags are set (a hand-edited snapshot), the one earliest
    /// in turn order wins, matching what the store reports as active.
    pub fn state(&self) -> CursorState {
        turn_order(self.combatants)
            .into_iter()
            .map(|index| &self.combatants[index])
            .find(|combatant| combatant.is_active)
            .map_or(CursorState::NoActive, |combatant| {
                CursorState::ActiveOn(combatant.id)
            })
    }

    /// Activates the first non-defeated combatant in turn order.
    ///
    /// Falls back to [`CursorState::NoActive`] (all flags cleared) when the
    /// encounter is empty or everyone is defeated. The round is untouched.
    pub fn activate_first(&mut self) -> CursorState {
        let first = turn_order(self.combatants)
            .into_iter()
            .find(|&index| !self.combatants[index].is_defeated());

        match first {
            Some(index) => self.activate_index(index),
            None => {
                self.deactivate_all();
                CursorState::NoActive
            }
        }
    }

    /// Moves the turn to the next non-defeated combatant in turn order.
    ///
    /// Scans forward circularly from the active position. The round
    /// increments once when the scan wraps past the end of the order before
    /// finding a candidate; with a single combatant standing that happens on
    /// every call. If nobody is standing the cursor does not change at all.
    /// Without an active combatant the first eligible one is activated and
    /// the round is left alone.
    pub fn advance(&mut self) -> CursorState {
        let order = turn_order(self.combatants);

        if order
            .iter()
            .all(|&index| self.combatants[index].is_defeated())
        {
            return self.state();
        }

        let Some(start) = order
            .iter()
            .position(|&index| self.combatants[index].is_active)
        else {
            return self.activate_first();
        };

        let len = order.len();
        for step in 1..=len {
            let index = order[(start + step) % len];
            if self.combatants[index].is_defeated() {
                continue;
            }
            if start + step >= len {
                *self.round += 1;
            }
            return self.activate_index(index);
        }

        // The scan visits `start` last, and some combatant is standing.
        self.state()
    }

    /// Designates `id` as active, clearing the flag everywhere else.
    ///
    /// Returns false without touching anything if `id` is unknown.
    pub fn set_active(&mut self, id: CombatantId) -> bool {
        match self
            .combatants
            .iter()
            .position(|combatant| combatant.id == id)
        {
            Some(index) => {
                self.activate_index(index);
                true
            }
            None => false,
        }
    }

    /// Clears the active flag on every combatant.
    pub fn deactivate_all(&mut self) {
        for combatant in self.combatants.iter_mut() {
            combatant.is_active = false;
        }
    }

    /// Ends combat: no active combatant and the round back to its start.
    pub fn reset(&mut self) {
        self.deactivate_all();
        *self.round = EncounterConfig::STARTING_ROUND;
    }

    fn activate_index(&mut self, index: usize) -> CursorState {
        for (position, combatant) in self.combatants.iter_mut().enumerate() {
            combatant.is_active = position == index;
        }
        CursorState::ActiveOn(self.combatants[index].id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::combatant::NewCombatant;

    fn combatant(id: u32, initiative: i32, hp: i32) -> Combatant {
        NewCombatant::monster("bandit", format!("Bandit {id}"), 12, 10)
            .with_initiative(initiative)
            .with_current_hp(hp)
            .into_combatant(CombatantId(id), Utc::now())
    }

    fn active_count(combatants: &[Combatant]) -> usize {
        combatants.iter().filter(|c| c.is_active).count()
    }

    #[test]
    fn state_reads_the_earliest_active_in_turn_order() {
        let mut combatants = vec![combatant(1, 5, 4), combatant(2, 18, 4), combatant(3, 12, 4)];
        combatants[0].is_active = true;
        combatants[2].is_active = true;
        let mut round = 1;
        let cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.state(), CursorState::ActiveOn(CombatantId(3)));
    }

    #[test]
    fn activate_first_skips_defeated() {
        let mut combatants = vec![combatant(1, 20, 0), combatant(2, 15, 4)];
        let mut round = 1;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.activate_first(), CursorState::ActiveOn(CombatantId(2)));
        assert_eq!(active_count(&combatants), 1);
    }

    #[test]
    fn activate_first_with_everyone_down_clears_flags() {
        let mut combatants = vec![combatant(1, 20, 0), combatant(2, 15, 0)];
        combatants[0].is_active = true;
        let mut round = 3;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.activate_first(), CursorState::NoActive);
        assert_eq!(active_count(&combatants), 0);
        assert_eq!(round, 3);
    }

    #[test]
    fn advance_wraps_and_counts_rounds() {
        let mut combatants = vec![combatant(1, 10, 5), combatant(2, 20, 5)];
        let mut round = 1;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);
        cursor.activate_first();

        assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(1)));
        assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(2)));
        assert_eq!(round, 2);
    }

    #[test]
    fn advance_on_lone_survivor_only_bumps_round() {
        let mut combatants = vec![combatant(1, 20, 0), combatant(2, 15, 6), combatant(3, 5, 0)];
        let mut round = 1;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);
        cursor.activate_first();

        for _ in 0..3 {
            assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(2)));
        }
        assert_eq!(round, 4);
    }

    #[test]
    fn advance_without_survivors_changes_nothing() {
        let mut combatants = vec![combatant(1, 20, 0), combatant(2, 15, 0)];
        combatants[1].is_active = true;
        let before = combatants.clone();
        let mut round = 2;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(2)));
        assert_eq!(combatants, before);
        assert_eq!(round, 2);
    }

    #[test]
    fn advance_without_active_starts_at_the_top() {
        let mut combatants = vec![combatant(1, 5, 3), combatant(2, 18, 3)];
        let mut round = 1;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(2)));
        assert_eq!(round, 1);
    }

    #[test]
    fn advance_from_defeated_active_moves_on() {
        let mut combatants = vec![combatant(1, 20, 3), combatant(2, 15, 0), combatant(3, 10, 3)];
        combatants[1].is_active = true;
        let mut round = 1;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert_eq!(cursor.advance(), CursorState::ActiveOn(CombatantId(3)));
        assert_eq!(round, 1);
    }

    #[test]
    fn set_active_and_reset() {
        let mut combatants = vec![combatant(1, 20, 3), combatant(2, 15, 3)];
        let mut round = 4;
        let mut cursor = TurnCursor::new(&mut combatants, &mut round);

        assert!(cursor.set_active(CombatantId(2)));
        assert!(!cursor.set_active(CombatantId(99)));
        assert_eq!(cursor.state(), CursorState::ActiveOn(CombatantId(2)));

        cursor.reset();
        assert_eq!(cursor.state(), CursorState::NoActive);
        assert_eq!(round, 1);
    }
}
