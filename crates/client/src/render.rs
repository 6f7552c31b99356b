//! Plain-text turn order table.
use std::fmt::Write;

use encounter_core::Combatant;

pub fn turn_order(round: u32, order: &[Combatant]) -> String {
    let mut out = String::new();
    if order.is_empty() {
        out.push_str("no combatants\n");
        return out;
    }

    let _ = writeln!(out, "round {round}");
    for combatant in order {
        let _ = writeln!(out, "{}", row(combatant));
    }
    out
}

fn row(combatant: &Combatant) -> String {
    let marker = if combatant.is_active { '>' } else { ' ' };
    let side = if combatant.is_player { "ally" } else { "enemy" };
    let health = if combatant.is_defeated() {
        "down".to_owned()
    } else if combatant.is_bloodied() {
        "bloodied".to_owned()
    } else {
        format!("{}%", combatant.hp_percentage())
    };

    let mut line = format!(
        "{marker} {id:>4} {init:>3} {name:<20} AC {ac:>2}  HP {cur:>3}/{max:<3} {health:<8} {side}",
        id = combatant.id.to_string(),
        init = combatant.initiative,
        name = combatant.name,
        ac = combatant.armor_class,
        cur = combatant.current_hp,
        max = combatant.max_hp,
    );

    let conditions: Vec<String> = combatant
        .conditions
        .conditions()
        .map(|condition| condition.to_string())
        .collect();
    if !conditions.is_empty() {
        let _ = write!(line, "  [{}]", conditions.join(", "));
    }
    if let Some(notes) = &combatant.notes {
        let _ = write!(line, "  {notes}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{Condition, EncounterStore, NewCombatant};

    #[test]
    fn marks_the_active_combatant() {
        let mut store = EncounterStore::new();
        let orc =
            store.add_combatant(NewCombatant::monster("orc", "Orc", 13, 15).with_initiative(12));
        store.add_combatant(
            NewCombatant::character("pc-aria", "Aria", 16, 24)
                .with_initiative(8)
                .with_current_hp(10),
        );
        store.toggle_condition(orc, Condition::Prone);

        let order: Vec<Combatant> = store.sorted_combatants().into_iter().cloned().collect();
        let text = turn_order(store.round(), &order);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "round 1");
        assert!(lines[1].starts_with('>'));
        assert!(lines[1].contains("Orc"));
        assert!(lines[1].contains("[prone]"));
        assert!(lines[2].contains("bloodied"));
        assert!(lines[2].ends_with("ally"));
    }

    #[test]
    fn empty_encounter() {
        assert_eq!(turn_order(1, &[]), "no combatants\n");
    }
}
