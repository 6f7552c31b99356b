use encounter_core::{Character, EncounterState};
use serde::{Deserialize, Serialize};

/// Layout version written by this build.
pub const CURRENT_VERSION: u64 = 2;

/// Everything persisted for one session: the encounter and the roster it
/// draws characters from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u64,
    pub encounter: EncounterState,
    #[serde(default)]
    pub characters: Vec<Character>,
}

impl SaveData {
    pub fn new(encounter: EncounterState, characters: Vec<Character>) -> Self {
        Self {
            version: CURRENT_VERSION,
            encounter,
            characters,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

impl Default for SaveData {
    fn default() -> Self {
        Self::new(EncounterState::default(), Vec::new())
    }
}
