use encounter_core::{
    Combatant, CombatantId, Condition, EncounterStore, NewCombatant, PcgRng, RngOracle,
};

fn random_combatant(rng: &mut PcgRng, serial: u32) -> NewCombatant {
    let max_hp = rng.roll_die(40) as i32;
    // Narrow initiative band so ties are common.
    let initiative = rng.roll_die(6) as i32 + 8;
    let dex_modifier = rng.roll_die(3) as i32 - 2;
    let hp = rng.roll_die(max_hp as u32 + 1) as i32 - 1;
    NewCombatant::monster("skeleton", format!("Skeleton {serial}"), 13, max_hp)
        .with_current_hp(hp)
        .with_initiative(initiative)
        .with_dex_modifier(dex_modifier)
}

fn pick_id(store: &EncounterStore, rng: &mut PcgRng) -> CombatantId {
    let ids = store.sorted_combatants().ids();
    // Occasionally aim at an id that does not exist.
    let slot = rng.roll_die(ids.len() as u32 + 1) as usize - 1;
    ids.get(slot).copied().unwrap_or(CombatantId(u32::MAX))
}

fn assert_invariants(store: &EncounterStore) {
    let combatants = &store.snapshot().combatants;

    let active = combatants.iter().filter(|c| c.is_active).count();
    assert!(active <= 1, "{active} combatants are active");

    for combatant in combatants {
        assert!(
            (0..=combatant.max_hp).contains(&combatant.current_hp),
            "{} has {} of {} HP",
            combatant.name,
            combatant.current_hp,
            combatant.max_hp
        );
    }

    assert_eq!(store.in_combat(), !combatants.is_empty());
    assert!(store.round() >= 1);

    let order: Vec<&Combatant> = store.sorted_combatants().into_iter().collect();
    for pair in order.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            (a.initiative, a.dex_modifier) >= (b.initiative, b.dex_modifier),
            "order broken between {} and {}",
            a.name,
            b.name
        );
        if (a.initiative, a.dex_modifier) == (b.initiative, b.dex_modifier) {
            let insertion = |id: CombatantId| combatants.iter().position(|c| c.id == id);
            assert!(insertion(a.id) < insertion(b.id), "unstable tie");
        }
    }
}

#[test]
fn invariants_hold_across_random_operation_sequences() {
    for seed in 0..40 {
        let mut rng = PcgRng::seeded(seed);
        let mut store = EncounterStore::new();
        let mut serial = 0;

        for _ in 0..200 {
            match rng.roll_die(12) {
                1 | 2 => {
                    serial += 1;
                    store.add_combatant(random_combatant(&mut rng, serial));
                }
                3 => {
                    let id = pick_id(&store, &mut rng);
                    store.remove_combatant(id);
                }
                4 => {
                    let id = pick_id(&store, &mut rng);
                    let delta = rng.roll_die(2_000) as i32 - 1_000;
                    store.update_hp(id, delta);
                }
                5 => {
                    let id = pick_id(&store, &mut rng);
                    let amount = rng.roll_die(30) as i32;
                    store.apply_damage(id, amount);
                }
                6 => {
                    let id = pick_id(&store, &mut rng);
                    let amount = rng.roll_die(30) as i32;
                    store.heal(id, amount);
                }
                7 | 8 => {
                    store.next_turn();
                }
                9 => {
                    let id = pick_id(&store, &mut rng);
                    let value = f64::from(rng.roll_die(90) as i32 - 25) + 0.3;
                    store.set_manual_initiative(id, value);
                }
                10 => {
                    let id = pick_id(&store, &mut rng);
                    store.roll_initiative(id, &mut rng);
                }
                11 => {
                    let id = pick_id(&store, &mut rng);
                    store.set_active(id);
                }
                _ => {
                    let id = pick_id(&store, &mut rng);
                    store.toggle_condition(id, Condition::Stunned);
                }
            }
            assert_invariants(&store);
        }
    }
}

#[test]
fn full_cycle_returns_to_start_and_adds_one_round() {
    for seed in 100..140 {
        let mut rng = PcgRng::seeded(seed);
        let mut store = EncounterStore::new();
        let count = rng.roll_die(8);
        for serial in 0..count {
            store.add_combatant(random_combatant(&mut rng, serial));
        }
        // Guarantee at least one combatant is standing.
        let first = store.sorted_combatants().ids()[0];
        store.update_hp(first, 1);
        store.start_combat();

        let start = store.active_combatant().map(|c| c.id);
        let round = store.round();
        let standing = store
            .snapshot()
            .combatants
            .iter()
            .filter(|c| !c.is_defeated())
            .count();

        for step in 1..=standing {
            store.next_turn();
            let active = store.active_combatant().expect("someone is active");
            assert!(!active.is_defeated(), "defeated combatant got the turn");
            if step < standing {
                assert_ne!(Some(active.id), start);
            }
        }

        assert_eq!(store.active_combatant().map(|c| c.id), start);
        assert_eq!(store.round(), round + 1);
    }
}

#[test]
fn removing_unknown_id_is_idempotent() {
    let mut rng = PcgRng::seeded(5);
    let mut store = EncounterStore::new();
    for serial in 0..5 {
        store.add_combatant(random_combatant(&mut rng, serial));
    }
    store.next_turn();
    let before = store.clone();

    store.remove_combatant(CombatantId(4_000));
    store.remove_combatant(CombatantId(4_000));
    assert_eq!(store, before);
}
