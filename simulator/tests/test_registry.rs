mod aux;

use aux::{advance_to, encounter_with};
use models::v1::{SizeCategory, SummonPosition};
use rstest::rstest;
use simulator::{Hit, Registry, Ticks};

#[rstest]
fn test_positions_and_ids() -> Result<(), Box<dyn std::error::Error>> {
    let bestiary = gamedata::BESTIARY.clone();
    let template = |id: &str| bestiary.get(id).cloned().ok_or(format!("missing {id}"));

    let mut registry = Registry::default();
    let first = registry.spawn(template("dust_mite")?, Ticks(0), SummonPosition::Bottom, None);
    let second = registry.spawn(template("gear_tick")?, Ticks(0), SummonPosition::Bottom, None);
    let top = registry.spawn(
        template("spark_flea")?,
        Ticks(3),
        SummonPosition::Top,
        Some(second),
    );

    assert_eq!(registry.ids(), vec![top, first, second]);
    assert!(first.value() < second.value() && second.value() < top.value());
    assert_eq!(registry.live_summons(second), 1);
    assert_eq!(registry.by_size(SizeCategory::Small).count(), 3);
    assert_eq!(registry.get(top).map(|i| i.spawned_at), Some(Ticks(3)));

    registry.remove(first);
    assert_eq!(registry.ids(), vec![top, second]);
    assert_eq!(registry.len(), 2);
    Ok(())
}

#[rstest]
fn test_protected_while_others_exist() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["echo_chamber", "dust_mite"])?;
    assert_eq!(encounter.targetable_instances(), vec![ids[1]]);

    encounter.apply_hit(ids[1], Hit::new(8))?;
    assert_eq!(encounter.targetable_instances(), vec![ids[0]]);
    Ok(())
}

#[rstest]
fn test_protected_while_summons_alive() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["mirror_warden"])?;
    assert_eq!(encounter.targetable_instances(), vec![ids[0]]);

    advance_to(&mut encounter, 8);
    let targetable = encounter.targetable_instances();
    assert_eq!(targetable.len(), 1);
    let gnat = targetable[0];
    assert_ne!(gnat, ids[0]);
    assert_eq!(
        encounter.instance(gnat).map(|i| i.template_id().to_string()),
        Some("barrier_gnat".to_string())
    );

    encounter.apply_hit(gnat, Hit::new(3))?;
    encounter.apply_hit(gnat, Hit::new(3))?;
    assert_eq!(encounter.targetable_instances(), vec![ids[0]]);
    Ok(())
}

#[rstest]
fn test_untargetable_still_take_area_effects() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["echo_chamber", "chaos_imp"])?;
    // chaos_imp leaves its passive move at 10 and shields everyone at 15
    advance_to(&mut encounter, 15);
    assert!(!encounter.targetable_instances().contains(&ids[0]));
    assert_eq!(encounter.instance(ids[0]).map(|i| i.shields), Some(3));
    Ok(())
}

#[rstest]
fn test_empty_board_terminates() -> Result<(), Box<dyn std::error::Error>> {
    let (mut encounter, ids) = encounter_with(&["basic_gnat"])?;
    encounter.advance();
    encounter.apply_hit(ids[0], Hit::new(1))?;
    assert!(encounter.is_terminated());
    assert!(encounter.registry.is_empty());
    Ok(())
}

#[rstest]
#[should_panic]
fn test_advancing_terminated_encounter_panics() {
    let (mut encounter, _) = encounter_with(&["basic_gnat"]).expect("bestiary has basic_gnat");
    encounter.terminate();
    encounter.advance();
}
