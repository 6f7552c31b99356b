//! The encounter store: sole owner and mutator of combatant records.
//!
//! Every public operation runs to completion, then re-derives turn order on
//! the way out, so after any call at most one combatant is active and every
//! combatant has `0 <= current_hp <= max_hp`. Operations on unknown ids,
//! out-of-range manual initiative and advancing an empty or fully defeated
//! roster are silent no-ops rather than errors.
mod state;
mod view;

use chrono::Utc;

pub use state::EncounterState;
pub use view::{Sides, TurnOrder};

use crate::combatant::{Combatant, CombatantId, Condition, NewCombatant, clamp_hp};
use crate::config::EncounterConfig;
use crate::initiative::{self, InitiativeRoll};
use crate::rng::RngOracle;
use crate::turn::{CursorState, TurnCursor};

/// Owns one encounter and enforces its invariants.
///
/// Hosts that share a store between threads wrap the whole store in a single
/// lock; there is no finer-grained locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncounterStore {
    state: EncounterState,
}

impl EncounterStore {
    /// Creates an empty encounter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously persisted encounter.
    ///
    /// The snapshot is trusted and taken verbatim, except that hit points are
    /// clamped into `0..=max_hp` and the id allocator is moved past every id
    /// in use.
    pub fn from_snapshot(mut state: EncounterState) -> Self {
        for combatant in &mut state.combatants {
            combatant.clamp_hp();
        }
        state.repair_id_allocator();
        Self { state }
    }

    /// Plain data for the persistence layer.
    pub fn snapshot(&self) -> &EncounterState {
        &self.state
    }

    pub fn into_snapshot(self) -> EncounterState {
        self.state
    }

    // ===== queries =====

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn in_combat(&self) -> bool {
        self.state.in_combat
    }

    pub fn len(&self) -> usize {
        self.state.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.combatants.is_empty()
    }

    /// Combatants in turn order, recomputed on every call.
    pub fn sorted_combatants(&self) -> TurnOrder<'_> {
        TurnOrder::derive(&self.state.combatants)
    }

    /// The combatant holding the turn, if any.
    pub fn active_combatant(&self) -> Option<&Combatant> {
        self.sorted_combatants().active()
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.state.combatants.iter().find(|combatant| combatant.id == id)
    }

    /// Allies and enemies for display, each in turn order.
    pub fn sides(&self) -> Sides<'_> {
        self.sorted_combatants().sides()
    }

    pub fn cursor_state(&self) -> CursorState {
        self.active_combatant()
            .map_or(CursorState::NoActive, |combatant| {
                CursorState::ActiveOn(combatant.id)
            })
    }

    // ===== roster =====

    /// Inserts a combatant and returns its new id.
    ///
    /// The record is assumed to be validated upstream; only its hit points
    /// are clamped. If nobody holds the turn yet, the top of the order gets
    /// it.
    pub fn add_combatant(&mut self, new: NewCombatant) -> CombatantId {
        let id = self.state.allocate_combatant_id();
        let combatant = new.into_combatant(id, Utc::now());
        self.state.combatants.push(combatant);
        self.state.in_combat = true;

        if self.cursor().state() == CursorState::NoActive {
            self.cursor().activate_first();
        }
        id
    }

    /// Removes a combatant. Unknown ids are ignored.
    ///
    /// Removing the active combatant hands the turn to the first standing
    /// combatant in turn order. Emptying the roster ends combat and resets
    /// the round.
    pub fn remove_combatant(&mut self, id: CombatantId) -> TurnOrder<'_> {
        if let Some(index) = self.index_of(id) {
            let removed = self.state.combatants.remove(index);
            if removed.is_active {
                self.cursor().activate_first();
            }
            if self.state.combatants.is_empty() {
                self.state.in_combat = false;
                self.state.round = EncounterConfig::STARTING_ROUND;
            }
        }
        self.sorted_combatants()
    }

    /// Empties the roster and resets the encounter.
    pub fn clear_combat(&mut self) -> TurnOrder<'_> {
        self.state.combatants.clear();
        self.state.round = EncounterConfig::STARTING_ROUND;
        self.state.in_combat = false;
        self.sorted_combatants()
    }

    // ===== hit points & status =====

    /// Sets hit points, clamped into `0..=max_hp`.
    ///
    /// Neither turn order nor the active combatant change.
    pub fn update_hp(&mut self, id: CombatantId, new_hp: i32) -> TurnOrder<'_> {
        if let Some(combatant) = self.combatant_mut(id) {
            combatant.current_hp = clamp_hp(new_hp, combatant.max_hp);
        }
        self.sorted_combatants()
    }

    /// Subtracts a flat amount of hit points.
    pub fn apply_damage(&mut self, id: CombatantId, amount: i32) -> TurnOrder<'_> {
        let Some(current_hp) = self.get(id).map(|combatant| combatant.current_hp) else {
            return self.sorted_combatants();
        };
        self.update_hp(id, current_hp.saturating_sub(amount))
    }

    /// Adds a flat amount of hit points.
    pub fn heal(&mut self, id: CombatantId, amount: i32) -> TurnOrder<'_> {
        let Some(current_hp) = self.get(id).map(|combatant| combatant.current_hp) else {
            return self.sorted_combatants();
        };
        self.update_hp(id, current_hp.saturating_add(amount))
    }

    /// Adds the condition if absent, removes it if present.
    pub fn toggle_condition(&mut self, id: CombatantId, condition: Condition) -> TurnOrder<'_> {
        if let Some(combatant) = self.combatant_mut(id) {
            combatant.conditions.flip(condition);
        }
        self.sorted_combatants()
    }

    pub fn set_notes(&mut self, id: CombatantId, notes: Option<String>) -> TurnOrder<'_> {
        if let Some(combatant) = self.combatant_mut(id) {
            combatant.notes = notes;
        }
        self.sorted_combatants()
    }

    // ===== turns =====

    /// Hands the turn to `id` regardless of order or hit points.
    pub fn set_active(&mut self, id: CombatantId) -> TurnOrder<'_> {
        self.cursor().set_active(id);
        self.sorted_combatants()
    }

    /// Advances to the next standing combatant, counting rounds on wrap.
    pub fn next_turn(&mut self) -> TurnOrder<'_> {
        if !self.state.combatants.is_empty() {
            self.cursor().advance();
        }
        self.sorted_combatants()
    }

    /// Restarts from round 1 with the top of the order active.
    pub fn start_combat(&mut self) -> TurnOrder<'_> {
        self.state.round = EncounterConfig::STARTING_ROUND;
        self.cursor().activate_first();
        self.sorted_combatants()
    }

    /// Keeps the roster but clears the active turn and resets the round.
    pub fn end_combat(&mut self) -> TurnOrder<'_> {
        self.cursor().reset();
        self.sorted_combatants()
    }

    // ===== initiative =====
    //
    // Initiative changes move display positions only. The active flag lives
    // on the record, so the same combatant keeps the turn after a re-sort.

    /// Rolls initiative for one combatant. Returns `None` for unknown ids.
    pub fn roll_initiative<R>(&mut self, id: CombatantId, rng: &mut R) -> Option<InitiativeRoll>
    where
        R: RngOracle + ?Sized,
    {
        let combatant = self.combatant_mut(id)?;
        let roll = initiative::roll_initiative(rng, combatant.dex_modifier);
        combatant.initiative = roll.total;
        Some(roll)
    }

    /// Rolls initiative for everyone, in insertion order.
    pub fn roll_all_initiatives<R>(&mut self, rng: &mut R) -> Vec<(CombatantId, InitiativeRoll)>
    where
        R: RngOracle + ?Sized,
    {
        initiative::roll_all_initiatives(&mut self.state.combatants, rng)
    }

    /// Sets initiative by hand. Rounded to the nearest integer; values
    /// outside `-10..=50` are ignored.
    pub fn set_manual_initiative(&mut self, id: CombatantId, value: f64) -> TurnOrder<'_> {
        if let Some(initiative) = initiative::manual_initiative(value)
            && let Some(combatant) = self.combatant_mut(id)
        {
            combatant.initiative = initiative;
        }
        self.sorted_combatants()
    }

    // ===== internals =====

    fn cursor(&mut self) -> TurnCursor<'_> {
        TurnCursor::new(&mut self.state.combatants, &mut self.state.round)
    }

    fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.state
            .combatants
            .iter()
            .position(|combatant| combatant.id == id)
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.state
            .combatants
            .iter_mut()
            .find(|combatant| combatant.id == id)
    }
}
