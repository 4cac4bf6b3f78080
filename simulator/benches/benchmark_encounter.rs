use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use models::v1::MoveList;
use rand::{SeedableRng, rngs::StdRng};
use simulator::{Encounter, EncounterResult, EncounterTemplate};
use std::hint::black_box;

const TEMPLATE_STR: &str = include_str!("encounters/boss_rush.toml");
const SEED: u64 = 0x3a3f7af8085da7a2;
const MOVES_STR: &str = "ticks=2,drain_largest=3,drain_smallest=3,hand_size_limit=7|ticks=4,force_discard=2|ticks=0,remove_constraints,self_gain_armor=5|ticks=6,summon=random_medium,reflect_increase=12.5%";

fn load_encounter() -> (Encounter, u64) {
    let template = toml::from_str::<EncounterTemplate>(TEMPLATE_STR).expect("bad TOML");
    let seed = template.seed.unwrap_or(SEED);
    let encounter: Encounter = template.try_into().expect("invalid template");
    (encounter, seed)
}

fn bench_run_once(c: &mut Criterion) {
    let (encounter, seed) = load_encounter();
    let mut group = c.benchmark_group("encounter");
    group.throughput(Throughput::Elements(1));

    group.bench_function("run_once_with_rng", |b| {
        b.iter(|| {
            let rng = StdRng::seed_from_u64(black_box(seed));
            let out: EncounterResult = black_box(encounter.run_once_with_rng(rng));
            black_box(out);
        })
    });

    group.finish();
}

fn bench_parse_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_dsl");
    group.throughput(Throughput::Bytes(MOVES_STR.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| black_box(black_box(MOVES_STR).parse::<MoveList>().expect("bad moves")))
    });

    group.finish();
}

criterion_group!(benches, bench_run_once, bench_parse_moves);
criterion_main!(benches);
