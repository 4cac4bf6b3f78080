mod aux;

use std::sync::mpsc;

use aux::{advance_to, custom_encounter, encounter_with, record};
use models::v1::{Effect, ForceType, SizeCategory};
use rstest::rstest;
use simulator::{
    DispatchableEvent, EncounterEvent, Health, Hit, OverlayDuration, PlayerRequest,
};

#[rstest]
fn test_hard_cap_lasts_its_duration() -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, _) = encounter_with(&["dust_mite"])?;
    let mut encounter = encounter.with_resources([(ForceType::Heat, 20)]);
    let cap = Effect::parse_clause(0, "heat_hard_cap=3")?;

    encounter.apply_effect(None, &cap, OverlayDuration::Ticks(10));
    assert_eq!(encounter.pool.amount(ForceType::Heat), 3);
    assert_eq!(encounter.gain(ForceType::Heat, 10), 0);

    for _ in 0..10 {
        encounter.advance();
        encounter.gain(ForceType::Heat, 5);
        let snapshot = encounter.current_resource_snapshot();
        assert_eq!(snapshot.amount(ForceType::Heat), 3);
        assert_eq!(snapshot.forces[&ForceType::Heat].hard_cap, Some(3));
    }

    encounter.advance();
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), None);
    assert_eq!(encounter.gain(ForceType::Heat, 10), 10);

    let snapshot = encounter.current_resource_snapshot();
    assert_eq!(snapshot.amount(ForceType::Heat), 13);
    assert!(snapshot.forces[&ForceType::Heat].over_soft_cap());
    Ok(())
}

#[rstest]
fn test_all_forces_hard_cap_window() -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, _) = encounter_with(&["basic_gnat"])?;
    let mut encounter = encounter.with_resources([(ForceType::Heat, 9)]);
    let cap = Effect::parse_clause(0, "all_forces_hard_cap=6")?;

    encounter.apply_effect(None, &cap, OverlayDuration::Ticks(10));
    assert_eq!(encounter.pool.amount(ForceType::Heat), 6);
    for tick in 1..=10 {
        encounter.advance();
        encounter.gain(ForceType::Heat, 3);
        encounter.spend(ForceType::Heat, 1);
        encounter.gain(ForceType::Heat, 2);
        assert!(
            encounter.pool.amount(ForceType::Heat) <= 6,
            "heat above cap at tick {tick}"
        );
    }

    encounter.advance();
    assert_eq!(encounter.now().0, 11);
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), None);
    encounter.gain(ForceType::Heat, 5);
    assert_eq!(encounter.pool.amount(ForceType::Heat), 11);
    Ok(())
}

#[rstest]
fn test_soft_cap_never_clamps() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, _) = encounter_with(&["dust_mite"])?;
    assert_eq!(encounter.pool.soft_cap(ForceType::Heat), Some(4));
    assert_eq!(encounter.gain(ForceType::Heat, 9), 9);
    advance_to(&mut encounter, 5);
    assert_eq!(encounter.pool.amount(ForceType::Heat), 9);
    assert_eq!(encounter.pool.soft_cap(ForceType::Heat), Some(4));
    Ok(())
}

#[rstest]
fn test_total_cap_trims_largest_first() -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, _) = encounter_with(&["dust_mite"])?;
    let mut encounter = encounter.with_resources([
        (ForceType::Heat, 8),
        (ForceType::Precision, 5),
        (ForceType::Momentum, 3),
    ]);
    let cap = Effect::parse_clause(0, "total_resources_hard_cap=10")?;
    encounter.apply_effect(None, &cap, OverlayDuration::Permanent);

    let snapshot = encounter.current_resource_snapshot();
    assert_eq!(snapshot.total(), 10);
    assert_eq!(snapshot.total_cap, Some(10));
    assert_eq!(snapshot.amount(ForceType::Heat), 3);
    assert_eq!(snapshot.amount(ForceType::Precision), 4);
    assert_eq!(snapshot.amount(ForceType::Momentum), 3);

    assert_eq!(encounter.gain(ForceType::Balance, 4), 0);
    Ok(())
}

#[rstest]
#[case("drain_heat=2", [4, 5, 6, 0, 1])]
#[case("drain_largest=2", [4, 5, 6, 0, 1])]
#[case("drain_smallest=2", [6, 5, 6, 0, 0])]
#[case("drain_all_types=2", [4, 3, 4, 0, 0])]
#[case("heat_decay=10", [0, 5, 6, 0, 1])]
#[case("all_forces_decay=1", [5, 4, 5, 0, 0])]
fn test_drains(
    #[case] clause: &str,
    #[case] expected: [u32; 5],
) -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, _) = encounter_with(&["dust_mite"])?;
    let mut encounter = encounter.with_resources([
        (ForceType::Heat, 6),
        (ForceType::Precision, 5),
        (ForceType::Momentum, 6),
        (ForceType::Entropy, 1),
    ]);
    encounter.apply_effect(None, &Effect::parse_clause(0, clause)?, OverlayDuration::Permanent);
    let amounts = ForceType::ALL.map(|force| encounter.pool.amount(force));
    assert_eq!(amounts, expected);
    Ok(())
}

#[rstest]
fn test_drain_random_only_touches_present_forces() -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, _) = encounter_with(&["dust_mite"])?;
    let mut encounter = encounter.with_resources([(ForceType::Balance, 50)]);
    let drain = Effect::parse_clause(0, "drain_random=1")?;
    for _ in 0..20 {
        encounter.apply_effect(None, &drain, OverlayDuration::Permanent);
    }
    assert_eq!(encounter.pool.amount(ForceType::Balance), 30);

    let mut empty = encounter.with_resources([(ForceType::Balance, 0)]);
    empty.apply_effect(None, &drain, OverlayDuration::Permanent);
    assert_eq!(empty.pool.total(), 0);
    Ok(())
}

#[rstest]
fn test_drain_amplification_comes_from_others() -> Result<(), Box<dyn std::error::Error>> {
    let (encounter, ids) = encounter_with(&["chaos_imp", "spring_snapper"])?;
    let mut encounter = encounter.with_resources([(ForceType::Momentum, 20)]);
    let imp = ids[0];
    encounter.apply_effect(
        Some(imp),
        &Effect::parse_clause(0, "amplify_drains=1")?,
        OverlayDuration::Passive,
    );
    assert_eq!(encounter.pressure().drain_amplification(None), 1);
    assert_eq!(encounter.pressure().drain_amplification(Some(imp)), 0);

    advance_to(&mut encounter, 8);
    assert_eq!(encounter.pool.amount(ForceType::Momentum), 17);

    encounter.apply_effect(
        Some(imp),
        &Effect::parse_clause(0, "drain_momentum=2")?,
        OverlayDuration::Permanent,
    );
    assert_eq!(encounter.pool.amount(ForceType::Momentum), 15);

    encounter.apply_effect(
        None,
        &Effect::parse_clause(0, "momentum_decay=2")?,
        OverlayDuration::Permanent,
    );
    assert_eq!(encounter.pool.amount(ForceType::Momentum), 13);
    Ok(())
}

#[rstest]
fn test_passive_cap_lifts_when_source_dies() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["precision_mite", "dust_mite"])?;
    assert_eq!(encounter.gain(ForceType::Precision, 10), 2);

    advance_to(&mut encounter, 3);
    assert_eq!(encounter.pool.hard_cap(ForceType::Precision), Some(2));

    let outcome = encounter.apply_hit(ids[0], Hit::new(14))?;
    assert!(outcome.killed);
    assert!(encounter.instance(ids[0]).is_none());
    assert_eq!(encounter.pool.hard_cap(ForceType::Precision), None);
    assert_eq!(encounter.gain(ForceType::Precision, 10), 10);

    encounter.advance();
    assert_eq!(encounter.pool.amount(ForceType::Precision), 12);
    Ok(())
}

#[rstest]
fn test_passive_move_exit_releases_overlays() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["chaos_imp"])?;
    assert_eq!(encounter.pressure().drain_amplification(None), 1);

    advance_to(&mut encounter, 10);
    assert_eq!(encounter.instance(ids[0]).map(|i| i.move_index), Some(1));
    assert_eq!(encounter.pressure().drain_amplification(None), 0);
    Ok(())
}

#[rstest]
fn test_pressure_modifiers() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, _) = encounter_with(&["gear_tick", "gear_tick", "time_nibbler"])?;
    assert_eq!(encounter.pressure().card_cost_penalty(), 2);
    assert!(!encounter.pressure().draw_locked());

    // time_nibbler enters its lockdown move at tick 15 and fires it at 25
    advance_to(&mut encounter, 25);
    assert!(encounter.pressure().draw_locked());
    assert_eq!(encounter.pressure().hand_size_limit(), Some(6));

    let locked_for = (26..=40)
        .take_while(|_| {
            encounter.advance();
            encounter.pressure().draw_locked()
        })
        .count();
    assert_eq!(locked_for, 9);
    Ok(())
}

#[rstest]
fn test_player_requests() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["spark_flea"])?;
    advance_to(&mut encounter, 12);
    let requests = encounter
        .events()
        .iter()
        .filter_map(|event| match event.1 {
            EncounterEvent::Request(source, request) => Some((event.0.0, source, request)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        requests,
        vec![
            (6, Some(ids[0]), PlayerRequest::Discard(1)),
            (12, Some(ids[0]), PlayerRequest::Discard(1)),
        ]
    );
    Ok(())
}

#[rstest]
fn test_summon_cap_is_respected() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel();
    let (encounter, ids) = encounter_with(&["breeding_gnat"])?;
    let mut encounter = encounter.with_channel(tx);
    let breeder = ids[0];

    advance_to(&mut encounter, 100);
    assert_eq!(encounter.registry.live_summons(breeder), 2);
    assert_eq!(encounter.registry.by_template("basic_gnat").count(), 2);

    let blocked = encounter
        .events()
        .iter()
        .filter(|event| matches!(event.1, EncounterEvent::SummonBlocked(id, _) if id == breeder))
        .count();
    assert_eq!(blocked, 6);
    let dispatched = rx
        .try_iter()
        .filter(|event| matches!(event, DispatchableEvent::SummonBlocked(..)))
        .count();
    assert_eq!(dispatched, 6);
    Ok(())
}

#[rstest]
fn test_summon_slot_frees_when_summon_dies() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["breeding_gnat"])?;
    advance_to(&mut encounter, 24);
    assert_eq!(encounter.registry.live_summons(ids[0]), 2);

    let first_gnat = encounter
        .registry
        .by_template("basic_gnat")
        .map(|instance| instance.id)
        .next()
        .ok_or("no gnat summoned")?;
    encounter.apply_hit(first_gnat, Hit::new(1))?;
    assert_eq!(encounter.registry.live_summons(ids[0]), 1);

    advance_to(&mut encounter, 36);
    assert_eq!(encounter.registry.live_summons(ids[0]), 2);
    Ok(())
}

#[rstest]
fn test_random_summon_uses_size_and_position() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["dust_mite", "echo_chamber"])?;
    advance_to(&mut encounter, 4);

    let order = encounter.registry.ids();
    assert_eq!(order.len(), 3);
    let top = encounter.instance(order[0]).ok_or("missing summon")?;
    assert_eq!(top.template.size, SizeCategory::Medium);
    assert_eq!(top.summoner, Some(ids[1]));
    assert_eq!(&order[1..], &ids[..]);
    Ok(())
}

#[rstest]
fn test_on_death_summon() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["rust_king_phase_1"])?;
    advance_to(&mut encounter, 2);

    assert!(encounter.execute(ids[0])?);
    assert!(!encounter.is_terminated());
    let survivors = encounter
        .instances()
        .map(|instance| instance.template_id().to_string())
        .collect::<Vec<_>>();
    assert_eq!(survivors, vec!["rust_king_phase_2".to_string()]);
    assert!(encounter.events().iter().any(|event| matches!(
        event.1,
        EncounterEvent::Summoned { summoner: Some(id), .. } if id == ids[0]
    )));
    Ok(())
}

#[rstest]
fn test_armor_and_shield_gains() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["mirror_warden", "dust_mite"])?;
    // summon at 8, then the shield move fires at 14 for every gremlin
    advance_to(&mut encounter, 14);
    for instance in encounter.instances() {
        assert_eq!(instance.shields, 4, "{}", instance.template_id());
    }

    // the reflect move fires at 18
    advance_to(&mut encounter, 18);
    let reflect = encounter
        .instance(ids[0])
        .map(|instance| instance.reflect.as_percentage().round() as u32);
    assert_eq!(reflect, Some(35));
    Ok(())
}

#[rstest]
fn test_remove_constraints_releases_own_overlays() -> Result<(), Box<dyn std::error::Error>> {
    let mut encounter = custom_encounter(&[record(
        "warden",
        20,
        "ticks=0,heat_hard_cap=2,card_cost_penalty=1",
        "single",
    )])?;
    let id = encounter.spawn("warden")?;
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), Some(2));
    assert_eq!(encounter.pressure().card_cost_penalty(), 1);

    encounter.apply_effect(
        Some(id),
        &Effect::parse_clause(0, "remove_constraints")?,
        OverlayDuration::Permanent,
    );
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), None);
    assert_eq!(encounter.pressure().card_cost_penalty(), 0);
    Ok(())
}

#[rstest]
fn test_passive_one_shots_resolve_once() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["chronophage"])?;
    let id = ids[0];
    if let Some(instance) = encounter.registry.get_mut(id) {
        instance.health = Health(10, 180);
    }

    encounter.advance();
    assert_eq!(encounter.instance(id).map(|i| i.move_index), Some(4));
    assert_eq!(encounter.instance(id).map(|i| i.armor), Some(17));

    advance_to(&mut encounter, 21);
    assert_eq!(encounter.instance(id).map(|i| i.armor), Some(17));
    let gains = encounter
        .events()
        .iter()
        .filter(|event| matches!(event.1, EncounterEvent::ArmorGained(..)))
        .count();
    assert_eq!(gains, 1);
    let removals = encounter
        .events()
        .iter()
        .filter(|event| matches!(event.1, EncounterEvent::ConstraintsRemoved(..)))
        .count();
    assert_eq!(removals, 1);
    Ok(())
}

#[rstest]
fn test_passive_decay_repeats_every_tick() -> Result<(), Box<dyn std::error::Error>> {
    let mut encounter = custom_encounter(&[record(
        "rot",
        50,
        "ticks=0,all_forces_decay=2",
        "single",
    )])?
    .with_resources([(ForceType::Heat, 10), (ForceType::Balance, 3)]);
    encounter.spawn("rot")?;

    advance_to(&mut encounter, 3);
    assert_eq!(encounter.pool.amount(ForceType::Heat), 4);
    assert_eq!(encounter.pool.amount(ForceType::Balance), 0);

    advance_to(&mut encounter, 6);
    assert_eq!(encounter.pool.amount(ForceType::Heat), 0);
    Ok(())
}

#[rstest]
fn test_previous_constraints_are_reinstated() -> Result<(), Box<dyn std::error::Error>> {
    let mut encounter = custom_encounter(&[record(
        "engine",
        50,
        "ticks=2,heat_hard_cap=3|ticks=4,all_previous_constraints",
        "sequence",
    )])?;
    let id = encounter.spawn("engine")?;

    advance_to(&mut encounter, 2);
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), Some(3));
    advance_to(&mut encounter, 5);
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), None);

    encounter.advance();
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), Some(3));
    assert!(encounter.events().iter().any(|event| {
        event.0.0 == 6 && event.1 == EncounterEvent::ConstraintsReinstated(id, 1)
    }));
    Ok(())
}

#[rstest]
fn test_reinstating_without_history_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["basic_gnat"])?;
    encounter.apply_effect(
        Some(ids[0]),
        &Effect::parse_clause(0, "all_previous_constraints")?,
        OverlayDuration::Ticks(5),
    );
    assert_eq!(encounter.pool.hard_cap(ForceType::Heat), None);
    assert_eq!(encounter.pool.soft_cap(ForceType::Heat), None);
    assert_eq!(encounter.pool.total_cap(), None);
    assert!(encounter.events().iter().any(|event| {
        event.1 == EncounterEvent::ConstraintsReinstated(ids[0], 0)
    }));
    Ok(())
}
