use std::path::PathBuf;
use std::sync::Arc;

use models::v1::{Bestiary, TemplateRecord};
use rand::{SeedableRng, rngs::StdRng};
use simulator::{Encounter, EncounterEvent, EncounterResult, EncounterTemplate, InstanceId};
use tracing_subscriber::EnvFilter;

#[allow(unused)]
pub static SEED: u64 = 0x3a3f7af8085da7a2;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(unused)]
pub fn run_encounter(
    name: String,
    template: EncounterTemplate,
) -> Result<EncounterResult, Box<dyn std::error::Error>> {
    eprintln!("{}", name);
    let name = name.replace('"', "");
    let rng = StdRng::seed_from_u64(template.seed.unwrap_or(SEED));
    let encounter: Encounter = template.try_into()?;
    let result =
        tracing::info_span!("encounter", %name).in_scope(|| encounter.run_once_with_rng(rng));
    Ok(result)
}

#[allow(unused)]
pub fn read_encounter(path: &PathBuf) -> Result<EncounterTemplate, Box<dyn std::error::Error>> {
    let encounter_str = std::fs::read_to_string(path)?;
    let template = toml::from_str::<EncounterTemplate>(&encounter_str)?;
    Ok(template.with_source(encounter_str))
}

/// An encounter against the embedded bestiary with `gremlins` spawned top to bottom.
#[allow(unused)]
pub fn encounter_with(
    gremlins: &[&str],
) -> Result<(Encounter, Vec<InstanceId>), Box<dyn std::error::Error>> {
    let mut encounter = Encounter::new(gamedata::BESTIARY.clone(), SEED);
    let ids = gremlins
        .iter()
        .map(|template_id| encounter.spawn(template_id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((encounter, ids))
}

#[allow(unused)]
pub fn record(template_id: &str, max_health: u32, moves: &str, pattern: &str) -> TemplateRecord {
    TemplateRecord {
        template_id: template_id.to_string(),
        size_category: "medium".to_string(),
        max_health,
        moves: moves.to_string(),
        move_pattern: pattern.to_string(),
        ..Default::default()
    }
}

/// An encounter against a bestiary built from `records` only.
#[allow(unused)]
pub fn custom_encounter(records: &[TemplateRecord]) -> Result<Encounter, Box<dyn std::error::Error>> {
    let (bestiary, errors) = Bestiary::load(records);
    if let Some(error) = errors.first() {
        return Err(Box::new(error.clone()));
    }
    Ok(Encounter::new(Arc::new(bestiary), SEED))
}

#[allow(unused)]
pub fn advance_to(encounter: &mut Encounter, tick: u64) {
    while encounter.now().0 < tick {
        encounter.advance();
    }
}

/// Ticks at which `id` fired a move, with the move index.
#[allow(unused)]
pub fn firings(encounter: &Encounter, id: InstanceId) -> Vec<(u64, usize)> {
    encounter
        .events()
        .iter()
        .filter_map(|event| match event.1 {
            EncounterEvent::MoveFired(source, index) if source == id => Some((event.0.0, index)),
            _ => None,
        })
        .collect()
}

/// Moves `id` entered, in order.
#[allow(unused)]
pub fn entered_moves(encounter: &Encounter, id: InstanceId) -> Vec<usize> {
    encounter
        .events()
        .iter()
        .filter_map(|event| match event.1 {
            EncounterEvent::MoveEntered(source, index) if source == id => Some(index),
            _ => None,
        })
        .collect()
}
