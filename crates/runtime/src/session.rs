//! Lock-guarded encounter session.
//!
//! [`EncounterSession`] is what frontends talk to. It owns one
//! [`EncounterStore`] behind a single mutex, so every operation runs to
//! completion before the next one starts. After each mutation the current
//! snapshot is handed to the configured repository; a failed save is logged
//! and never fails the operation that caused it.

use std::sync::{Arc, Mutex, MutexGuard};

use encounter_content::spawn_monster;
use encounter_core::{
    BestiaryOracle, Character, Combatant, CombatantId, Condition, EncounterStore, InitiativeRoll,
    NewCombatant, OracleError, RngOracle, TurnOrder,
};

use crate::error::{Result, RuntimeError};
use crate::repository::{SaveData, SnapshotRepository};
use crate::rng::EntropyRng;

struct SessionState {
    store: EncounterStore,
    characters: Vec<Character>,
    rng: Box<dyn RngOracle + Send>,
}

/// One encounter shared by every caller of a frontend.
pub struct EncounterSession {
    state: Mutex<SessionState>,
    bestiary: Arc<dyn BestiaryOracle>,
    repository: Option<Arc<dyn SnapshotRepository>>,
}

impl EncounterSession {
    /// Empty, unsaved session rolling dice from OS entropy.
    pub fn new(bestiary: Arc<dyn BestiaryOracle>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                store: EncounterStore::new(),
                characters: Vec::new(),
                rng: Box::new(EntropyRng::new()),
            }),
            bestiary,
            repository: None,
        }
    }

    /// Restores from `repository` and saves back to it after every change.
    ///
    /// An unreadable snapshot starts the session empty.
    pub fn with_repository(mut self, repository: Arc<dyn SnapshotRepository>) -> Self {
        let data = repository.load_or_default();
        let state = self.state.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.store = EncounterStore::from_snapshot(data.encounter);
        state.characters = data.characters;
        tracing::info!(
            combatants = state.store.len(),
            round = state.store.round(),
            "Restored encounter"
        );
        self.repository = Some(repository);
        self
    }

    /// Replaces the dice source.
    pub fn with_rng(mut self, rng: impl RngOracle + Send + 'static) -> Self {
        let state = self.state.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.rng = Box::new(rng);
        self
    }

    // ===== queries =====

    /// Runs `f` against the store without mutating it.
    pub fn read<T>(&self, f: impl FnOnce(&EncounterStore) -> T) -> Result<T> {
        let state = self.lock()?;
        Ok(f(&state.store))
    }

    /// Turn order, cloned out of the lock.
    pub fn turn_order(&self) -> Result<Vec<Combatant>> {
        self.read(|store| owned(store.sorted_combatants()))
    }

    pub fn active_combatant(&self) -> Result<Option<Combatant>> {
        self.read(|store| store.active_combatant().cloned())
    }

    pub fn round(&self) -> Result<u32> {
        self.read(EncounterStore::round)
    }

    pub fn characters(&self) -> Result<Vec<Character>> {
        Ok(self.lock()?.characters.clone())
    }

    pub fn bestiary(&self) -> &dyn BestiaryOracle {
        self.bestiary.as_ref()
    }

    // ===== roster =====

    /// Replaces the character roster saved alongside the encounter.
    pub fn set_characters(&self, characters: Vec<Character>) -> Result<()> {
        self.mutate("set_characters", |state| state.characters = characters)
    }

    // ===== insertion =====

    /// Validates and inserts a combatant.
    pub fn add_combatant(&self, new: NewCombatant) -> Result<CombatantId> {
        new.validate()?;
        self.mutate("add_combatant", |state| state.store.add_combatant(new))
    }

    /// Inserts one instance of a bestiary monster under a unique display name.
    pub fn add_monster(&self, def_id: &str) -> Result<CombatantId> {
        let template = self.bestiary.require(def_id)?;
        self.try_mutate("add_monster", |state| {
            let new = {
                let names = state.store.snapshot().combatants.iter().map(|c| c.name.as_str());
                spawn_monster(def_id, &template, names)
            };
            new.validate()?;
            Ok(state.store.add_combatant(new))
        })
    }

    /// Inserts a roster character at full health.
    pub fn add_character(&self, character_id: &str) -> Result<CombatantId> {
        self.try_mutate("add_character", |state| {
            let new = state
                .characters
                .iter()
                .find(|character| character.id == character_id)
                .map(Character::to_new_combatant)
                .ok_or_else(|| OracleError::CharacterNotFound(character_id.to_owned()))?;
            new.validate()?;
            Ok(state.store.add_combatant(new))
        })
    }

    // ===== store operations =====

    pub fn remove_combatant(&self, id: CombatantId) -> Result<Vec<Combatant>> {
        self.mutate("remove_combatant", |state| owned(state.store.remove_combatant(id)))
    }

    pub fn clear_combat(&self) -> Result<Vec<Combatant>> {
        self.mutate("clear_combat", |state| owned(state.store.clear_combat()))
    }

    pub fn update_hp(&self, id: CombatantId, new_hp: i32) -> Result<Vec<Combatant>> {
        self.mutate("update_hp", |state| owned(state.store.update_hp(id, new_hp)))
    }

    pub fn apply_damage(&self, id: CombatantId, amount: i32) -> Result<Vec<Combatant>> {
        self.mutate("apply_damage", |state| owned(state.store.apply_damage(id, amount)))
    }

    pub fn heal(&self, id: CombatantId, amount: i32) -> Result<Vec<Combatant>> {
        self.mutate("heal", |state| owned(state.store.heal(id, amount)))
    }

    pub fn toggle_condition(
        &self,
        id: CombatantId,
        condition: Condition,
    ) -> Result<Vec<Combatant>> {
        self.mutate("toggle_condition", |state| {
            owned(state.store.toggle_condition(id, condition))
        })
    }

    pub fn set_notes(&self, id: CombatantId, notes: Option<String>) -> Result<Vec<Combatant>> {
        self.mutate("set_notes", |state| owned(state.store.set_notes(id, notes)))
    }

    pub fn set_active(&self, id: CombatantId) -> Result<Vec<Combatant>> {
        self.mutate("set_active", |state| owned(state.store.set_active(id)))
    }

    pub fn next_turn(&self) -> Result<Vec<Combatant>> {
        self.mutate("next_turn", |state| owned(state.store.next_turn()))
    }

    pub fn start_combat(&self) -> Result<Vec<Combatant>> {
        self.mutate("start_combat", |state| owned(state.store.start_combat()))
    }

    pub fn end_combat(&self) -> Result<Vec<Combatant>> {
        self.mutate("end_combat", |state| owned(state.store.end_combat()))
    }

    /// Rolls initiative for one combatant.
    pub fn roll_initiative(&self, id: CombatantId) -> Result<InitiativeRoll> {
        self.try_mutate("roll_initiative", |state| {
            let SessionState { store, rng, .. } = state;
            store
                .roll_initiative(id, &mut **rng)
                .ok_or(RuntimeError::CombatantNotFound(id))
        })
    }

    /// Rolls initiative for everyone.
    pub fn roll_all_initiatives(&self) -> Result<Vec<(CombatantId, InitiativeRoll)>> {
        self.mutate("roll_all_initiatives", |state| {
            let SessionState { store, rng, .. } = state;
            store.roll_all_initiatives(&mut **rng)
        })
    }

    pub fn set_manual_initiative(&self, id: CombatantId, value: f64) -> Result<Vec<Combatant>> {
        self.mutate("set_manual_initiative", |state| {
            owned(state.store.set_manual_initiative(id, value))
        })
    }

    // ===== internals =====

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>> {
        self.state.lock().map_err(|_| RuntimeError::LockPoisoned)
    }

    fn mutate<T>(&self, op: &'static str, f: impl FnOnce(&mut SessionState) -> T) -> Result<T> {
        self.try_mutate(op, |state| Ok(f(state)))
    }

    /// Runs `f` under the lock, then saves if it succeeded.
    ///
    /// The save happens before the lock is released so snapshots land in the
    /// same order as the mutations that produced them.
    fn try_mutate<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut SessionState) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.lock()?;
        let output = f(&mut *state)?;

        tracing::debug!(
            op,
            round = state.store.round(),
            combatants = state.store.len(),
            active = ?state.store.active_combatant().map(|c| c.id),
            "Encounter updated"
        );
        self.persist(&*state);
        Ok(output)
    }

    fn persist(&self, state: &SessionState) {
        let Some(repository) = &self.repository else {
            return;
        };
        let data = SaveData::new(state.store.snapshot().clone(), state.characters.clone());
        if let Err(err) = repository.save(&data) {
            tracing::warn!("Failed to save encounter snapshot: {}", err);
        }
    }
}

fn owned(order: TurnOrder<'_>) -> Vec<Combatant> {
    order.into_iter().cloned().collect()
}
