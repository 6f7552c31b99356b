use crate::combatant::{Combatant, CombatantId};
use crate::config::EncounterConfig;

/// Plain data of one encounter, exactly what the persistence layer snapshots.
///
/// `combatants` is kept in insertion order. Turn order is derived from it on
/// demand and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    pub combatants: Vec<Combatant>,

    /// Starts at 1 and increments once per full cycle of the turn order.
    #[cfg_attr(feature = "serde", serde(default = "starting_round"))]
    pub round: u32,

    /// True iff `combatants` is non-empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub in_combat: bool,

    /// Sequential id allocator, monotonically increasing and never reused.
    ///
    /// Older snapshots lack it; restoring re-derives it from the ids present.
    #[cfg_attr(feature = "serde", serde(default))]
    next_combatant_id: u32,
}

#[cfg(feature = "serde")]
fn starting_round() -> u32 {
    EncounterConfig::STARTING_ROUND
}

impl EncounterState {
    /// Creates an empty encounter on round 1.
    pub fn new() -> Self {
        Self {
            combatants: Vec::new(),
            round: EncounterConfig::STARTING_ROUND,
            in_combat: false,
            next_combatant_id: 1,
        }
    }

    /// Creates a state from restored parts.
    ///
    /// The id allocator is derived from the ids present.
    pub fn from_parts(combatants: Vec<Combatant>, round: u32, in_combat: bool) -> Self {
        let mut state = Self {
            combatants,
            round,
            in_combat,
            next_combatant_id: 0,
        };
        state.repair_id_allocator();
        state
    }

    /// Next id that will be handed out.
    pub fn next_combatant_id(&self) -> CombatantId {
        CombatantId(self.peek_combatant_id())
    }

    /// Allocates a new unique CombatantId.
    ///
    /// Ids count up and are not reused. Once the counter has reached the end
    /// of the u32 space (only possible through a restored snapshot), the
    /// lowest id not currently in use is handed out instead.
    pub(crate) fn allocate_combatant_id(&mut self) -> CombatantId {
        let id = self.peek_combatant_id();
        self.next_combatant_id = id.saturating_add(1);
        CombatantId(id)
    }

    /// Moves the allocator past every id already in use.
    pub(crate) fn repair_id_allocator(&mut self) {
        let floor = self
            .combatants
            .iter()
            .map(|combatant| combatant.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        self.next_combatant_id = self.next_combatant_id.max(floor).max(1);
    }

    fn peek_combatant_id(&self) -> u32 {
        if self.id_in_use(self.next_combatant_id) {
            self.lowest_free_id()
        } else {
            self.next_combatant_id
        }
    }

    fn id_in_use(&self, id: u32) -> bool {
        self.combatants.iter().any(|combatant| combatant.id.0 == id)
    }

    /// Lowest free id from 1 upwards. Falls back to 0 only if every id in
    /// `1..=u32::MAX` is taken.
    fn lowest_free_id(&self) -> u32 {
        let mut used: Vec<u32> = self
            .combatants
            .iter()
            .map(|combatant| combatant.id.0)
            .collect();
        used.sort_unstable();
        used.dedup();

        let mut candidate: u32 = 1;
        for id in used {
            if id > candidate {
                break;
            }
            if id == candidate {
                match candidate.checked_add(1) {
                    Some(next) => candidate = next,
                    None => return 0,
                }
            }
        }
        candidate
    }
}

impl Default for EncounterState {
    fn default() -> Self {
        Self::new()
    }
}
