//! Decoding of stored snapshots across layout versions.
//!
//! Version 1 documents predate the `version` field. They keep the encounter
//! fields at the top level next to `characters`, may lack `round` and
//! `next_combatant_id`, store conditions as a list of names, and may lack
//! `added_at` on combatants.

use chrono::Utc;
use encounter_core::{Combatant, Condition, EncounterConfig, EncounterState};
use serde_json::{Map, Value};

use super::error::{RepositoryError, Result};
use super::save_data::{CURRENT_VERSION, SaveData};

/// Decode stored bytes into the current layout.
pub fn decode(bytes: &[u8]) -> Result<SaveData> {
    let document: Value = serde_json::from_slice(bytes)?;
    let version = match document.get("version") {
        None => 1,
        Some(value) => value.as_u64().ok_or_else(|| {
            RepositoryError::CorruptedData(format!("version is not a number: {value}"))
        })?,
    };

    match version {
        1 => migrate_v1(document),
        CURRENT_VERSION => Ok(serde_json::from_value(document)?),
        other => Err(RepositoryError::UnsupportedVersion(other)),
    }
}

fn migrate_v1(document: Value) -> Result<SaveData> {
    let Value::Object(mut root) = document else {
        return Err(RepositoryError::CorruptedData(
            "snapshot is not a JSON object".into(),
        ));
    };

    let combatants = match root.remove("combatants") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(migrate_combatant)
            .collect::<Result<Vec<_>>>()?,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(RepositoryError::CorruptedData(format!(
                "combatants is not a list: {other}"
            )));
        }
    };

    let round = root
        .get("round")
        .and_then(Value::as_u64)
        .and_then(|round| u32::try_from(round).ok())
        .unwrap_or(EncounterConfig::STARTING_ROUND);
    let in_combat = root
        .get("in_combat")
        .and_then(Value::as_bool)
        .unwrap_or(!combatants.is_empty());
    let characters = match root.remove("characters") {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value(value)?,
    };

    // `from_parts` re-derives the id allocator from the restored ids.
    let encounter = EncounterState::from_parts(combatants, round, in_combat);
    Ok(SaveData::new(encounter, characters))
}

fn migrate_combatant(entry: Value) -> Result<Combatant> {
    let Value::Object(mut fields) = entry else {
        return Err(RepositoryError::CorruptedData(
            "combatant is not a JSON object".into(),
        ));
    };

    let conditions = take_condition_names(&mut fields)?;
    fields
        .entry("added_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

    let mut combatant: Combatant = serde_json::from_value(Value::Object(fields))?;
    combatant.conditions = conditions.into_iter().collect();
    Ok(combatant)
}

fn take_condition_names(fields: &mut Map<String, Value>) -> Result<Vec<Condition>> {
    match fields.remove("conditions") {
        Some(Value::Array(names)) => names
            .into_iter()
            .map(|name| serde_json::from_value(name).map_err(RepositoryError::from))
            .collect(),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => Err(RepositoryError::CorruptedData(format!(
            "conditions is not a list: {other}"
        ))),
    }
}
