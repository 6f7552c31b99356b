//! Display names for repeated monsters.
//!
//! The encounter store never renames anything. Callers pick a unique display
//! name before insertion: the first goblin is "Goblin", the next "Goblin 2",
//! then "Goblin 3", always one past the highest number already in use.

use encounter_core::{MonsterTemplate, NewCombatant};

/// Picks a display name for another instance of `base`.
pub fn disambiguate_name<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|name| instance_number(base, name))
        .max();

    match highest {
        None => base.to_owned(),
        Some(n) => format!("{} {}", base, n + 1),
    }
}

/// "Goblin" is instance 1, "Goblin 4" is instance 4, "Goblin Boss" is not an
/// instance of "Goblin".
fn instance_number(base: &str, name: &str) -> Option<u32> {
    if name == base {
        return Some(1);
    }
    name.strip_prefix(base)?
        .strip_prefix(' ')?
        .parse()
        .ok()
}

/// Insertion record for a new instance of a bestiary monster, named against
/// the combatants already present.
pub fn spawn_monster<'a, I>(def_id: &str, template: &MonsterTemplate, existing: I) -> NewCombatant
where
    I: IntoIterator<Item = &'a str>,
{
    let name = disambiguate_name(&template.name, existing);
    template.to_new_combatant(def_id, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_instance_keeps_base_name() {
        assert_eq!(disambiguate_name("Goblin", ["Orc", "Goblin Boss"]), "Goblin");
    }

    #[test]
    fn numbers_follow_the_highest_instance() {
        assert_eq!(disambiguate_name("Goblin", ["Goblin"]), "Goblin 2");
        assert_eq!(disambiguate_name("Goblin", ["Goblin", "Goblin 2"]), "Goblin 3");
        // A gap left by a removed goblin is not reused.
        assert_eq!(disambiguate_name("Goblin", ["Goblin", "Goblin 4"]), "Goblin 5");
        assert_eq!(disambiguate_name("Goblin", ["Goblin 2"]), "Goblin 3");
    }

    #[test]
    fn spawned_monster_uses_template_stats() {
        let wolf = MonsterTemplate {
            name: "Wolf".into(),
            armor_class: 13,
            hit_points: 11,
            dexterity: 15,
            challenge_rating: None,
        };
        let record = spawn_monster("wolf", &wolf, ["Wolf"]);
        assert_eq!(record.name, "Wolf 2");
        assert_eq!(record.entity_id, "wolf");
        assert_eq!(record.max_hp, 11);
        assert_eq!(record.dex_modifier, 2);
    }
}
