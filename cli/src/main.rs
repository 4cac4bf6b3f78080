mod args;
mod worker;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use models::v1::{Bestiary, MoveList, SizeCategory, ValidationError};
use rand::{Rng, SeedableRng, rngs::StdRng};
use simulator::{DEFAULT_SEED, DispatchableEvent, Encounter, EncounterSummary, EncounterTemplate};
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands, RunArgs};
use worker::spawn_run_encounter_thread;

lazy_static::lazy_static! {
    pub static ref OPTIMAL_THREAD_COUNT: usize = num_cpus::get().max(1);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (bestiary, errors) = load_bestiary(&cli)?;
    match cli.command {
        Commands::Run(args) => run(args, bestiary),
        Commands::Validate => validate(&bestiary, &errors),
        Commands::List { size } => list(&bestiary, size.as_deref()),
        Commands::Waves => {
            for wave in gamedata::WAVES.iter() {
                println!("{wave}: {}", wave.gremlins.join(", "));
            }
            Ok(())
        }
        Commands::Moves { moves } => {
            let parsed = moves
                .parse::<MoveList>()
                .map_err(|error| anyhow::anyhow!("{error}"))?;
            for mv in parsed.iter() {
                println!("{}: {mv}", mv.index);
            }
            println!("{parsed}");
            Ok(())
        }
    }
}

fn load_bestiary(cli: &Cli) -> anyhow::Result<(Arc<Bestiary>, Vec<ValidationError>)> {
    match &cli.bestiary {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("unable to read bestiary {}", path.display()))?;
            let (bestiary, errors) = gamedata::load_bestiary(&source)?;
            tracing::info!(path = %path.display(), templates = bestiary.len(), "loaded bestiary");
            Ok((Arc::new(bestiary), errors))
        }
        None => Ok((
            gamedata::BESTIARY.clone(),
            gamedata::bestiary_errors().to_vec(),
        )),
    }
}

fn validate(bestiary: &Bestiary, errors: &[ValidationError]) -> anyhow::Result<()> {
    for error in errors {
        println!("{error}");
    }
    println!(
        "{} valid template(s), {} rejected",
        bestiary.len(),
        errors.len()
    );
    let wave_errors = gamedata::validate_waves(&gamedata::WAVES, bestiary)
        .into_iter()
        .chain(
            gamedata::wave_errors()
                .iter()
                .filter(|error| matches!(error, gamedata::WaveError::Document(_)))
                .cloned(),
        )
        .collect::<Vec<_>>();
    for error in &wave_errors {
        println!("{error}");
    }
    println!("{} wave(s) checked", gamedata::WAVES.len());
    if !errors.is_empty() {
        anyhow::bail!("bestiary has {} invalid template(s)", errors.len());
    }
    if !wave_errors.is_empty() {
        anyhow::bail!("wave catalog has {} problem(s)", wave_errors.len());
    }
    Ok(())
}

/// Resolves `scenario` as a wave id first, then as a scenario file.
fn load_scenario(scenario: &str) -> anyhow::Result<EncounterTemplate> {
    if let Some(wave) = gamedata::wave(scenario) {
        tracing::info!(%wave, "running predefined wave");
        return Ok(EncounterTemplate::from(wave));
    }
    let source = std::fs::read_to_string(scenario)
        .with_context(|| format!("{scenario} is neither a wave id nor a readable scenario"))?;
    Ok(toml::from_str::<EncounterTemplate>(&source)
        .with_context(|| format!("invalid scenario {scenario}"))?
        .with_source(source))
}

fn list(bestiary: &Bestiary, size: Option<&str>) -> anyhow::Result<()> {
    let size = size.map(|size| SizeCategory::try_from(size)).transpose()?;
    for template in bestiary.iter() {
        if size.is_some_and(|size| template.size != size) {
            continue;
        }
        println!(
            "{:<28} {:<7} hp={:<4} {:<9} {}",
            template.id,
            template.size,
            template.stats.max_health,
            template.pattern,
            template.moves
        );
    }
    Ok(())
}

fn run(args: RunArgs, bestiary: Arc<Bestiary>) -> anyhow::Result<()> {
    let template = load_scenario(&args.scenario)?;
    let base_seed = args.seed.or(template.seed).unwrap_or(*DEFAULT_SEED);
    let encounter = Encounter::from_template(template, bestiary)?;

    if args.iterations <= 1 {
        let encounter = match args.verbose {
            true => encounter.with_stdout(),
            false => encounter,
        };
        let result = encounter.run_once_with_rng(StdRng::seed_from_u64(base_seed));
        println!("{result}");
        return Ok(());
    }

    let mut seed_rng = StdRng::seed_from_u64(base_seed);
    let seeds = (0..args.iterations)
        .map(|index| (index, seed_rng.random::<u64>()))
        .collect::<Vec<_>>();
    let workers = args
        .workers
        .unwrap_or(*OPTIMAL_THREAD_COUNT)
        .clamp(1, args.iterations);

    let (res_tx, res_rx) = std::sync::mpsc::channel();
    let (evt_tx, evt_rx) = std::sync::mpsc::channel();
    let base_chunk = args.iterations / workers;
    let remainder = args.iterations % workers;
    let mut seeds = seeds.into_iter();
    let handles = (0..workers)
        .map(|i| {
            let chunk = base_chunk + if i < remainder { 1 } else { 0 };
            spawn_run_encounter_thread(
                seeds.by_ref().take(chunk).collect(),
                encounter.clone(),
                res_tx.clone(),
                args.verbose.then(|| evt_tx.clone()),
            )
        })
        .collect::<Vec<_>>();
    drop(res_tx);
    drop(evt_tx);
    tracing::info!(iterations = args.iterations, workers = handles.len(), "running encounters");

    let mut results = res_rx.iter().collect::<Vec<_>>();
    for handle in handles {
        if handle.join().is_err() {
            anyhow::bail!("encounter worker panicked");
        }
    }
    for event in evt_rx.try_iter() {
        match event {
            DispatchableEvent::Error(msg) => tracing::error!("{msg}"),
            DispatchableEvent::Warning(msg) => tracing::warn!("{msg}"),
            DispatchableEvent::Log(msg) => tracing::debug!("{msg}"),
            DispatchableEvent::SummonBlocked(summoner, spec) => {
                tracing::debug!(%summoner, %spec, "summon blocked")
            }
            DispatchableEvent::InstanceDied(instance, tick) => {
                tracing::debug!(%instance, %tick, "gremlin died")
            }
            DispatchableEvent::Tick(_) => {}
        }
    }

    results.sort_by_key(|(index, _)| *index);
    let results = results.into_iter().map(|(_, result)| result).collect::<Vec<_>>();
    println!("{}", EncounterSummary::from(&results));
    Ok(())
}
