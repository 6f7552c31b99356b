//! Deterministic rules for a tabletop combat encounter.
//!
//! `encounter-core` defines the canonical encounter model (combatants, round
//! counter, active turn) and the pure logic that keeps it consistent. All
//! mutation flows through [`store::EncounterStore`], which composes the
//! [`initiative`] comparator and the [`turn::TurnCursor`] on every change.
//! Persistence, content libraries and presentation live in other crates and
//! only see the plain data re-exported here.
pub mod combatant;
pub mod config;
pub mod error;
pub mod initiative;
pub mod rng;
pub mod roster;
pub mod store;
pub mod turn;

pub use combatant::{
    Combatant, CombatantId, CombatantKind, Condition, ConditionSet, NewCombatant, ValidationError,
};
pub use config::EncounterConfig;
pub use error::{EncounterError, ErrorSeverity};
pub use initiative::{InitiativeRoll, compare, manual_initiative, roll_initiative};
pub use rng::{PcgRng, RngOracle};
pub use roster::{BestiaryOracle, Character, MonsterTemplate, OracleError, ability_modifier};
pub use store::{EncounterState, EncounterStore, Sides, TurnOrder};
pub use turn::{CursorState, TurnCursor};
