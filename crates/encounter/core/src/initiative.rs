//! Initiative values and turn ordering.
//!
//! The initiative engine is stateless: it rolls values, validates manual
//! entries and supplies the comparator that defines turn order. Callers
//! apply the results and re-derive the order afterwards.

use core::cmp::Ordering;

use crate::combatant::{Combatant, CombatantId};
use crate::config::EncounterConfig;
use crate::rng::RngOracle;

/// Outcome of one initiative roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeRoll {
    /// Natural die result, `1..=20`.
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
}

/// Rolls a d20 and adds the modifier. Pure apart from drawing from `rng`.
pub fn roll_initiative<R>(rng: &mut R, dex_modifier: i32) -> InitiativeRoll
where
    R: RngOracle + ?Sized,
{
    let roll = rng.roll_die(EncounterConfig::INITIATIVE_DIE);
    InitiativeRoll {
        roll,
        modifier: dex_modifier,
        total: roll as i32 + dex_modifier,
    }
}

/// Rolls fresh initiative for every combatant, replacing `initiative`.
///
/// Combatants are rolled in collection order so a seeded generator yields
/// the same assignment every time.
pub fn roll_all_initiatives<R>(
    combatants: &mut [Combatant],
    rng: &mut R,
) -> Vec<(CombatantId, InitiativeRoll)>
where
    R: RngOracle + ?Sized,
{
    combatants
        .iter_mut()
        .map(|combatant| {
            let roll = roll_initiative(rng, combatant.dex_modifier);
            combatant.initiative = roll.total;
            (combatant.id, roll)
        })
        .collect()
}

/// Converts a manually entered initiative into a stored value.
///
/// Rounds to the nearest integer (halves toward positive infinity, so -2.5
/// becomes -2), then range-checks
/// against `-10..=50`. Returns `None` for anything out of range or not
/// finite; callers treat that as "leave state unchanged".
pub fn manual_initiative(value: f64) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = (value + 0.5).floor();
    let min = f64::from(EncounterConfig::INITIATIVE_MIN);
    let max = f64::from(EncounterConfig::INITIATIVE_MAX);
    (min..=max).contains(&rounded).then_some(rounded as i32)
}

/// Turn-order comparator: initiative descending, then dex modifier
/// descending.
///
/// Full ties compare `Equal`; a stable sort keeps them in collection order.
pub fn compare(a: &Combatant, b: &Combatant) -> Ordering {
    b.initiative
        .cmp(&a.initiative)
        .then_with(|| b.dex_modifier.cmp(&a.dex_modifier))
}

/// Indices into `combatants` in turn order.
///
/// Recomputed on demand; the order is never stored.
pub fn turn_order(combatants: &[Combatant]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..combatants.len()).collect();
    // `sort_by` is stable, which is what preserves insertion order on ties.
    order.sort_by(|&a, &b| compare(&combatants[a], &combatants[b]));
    order
}
