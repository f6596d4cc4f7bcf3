//! Compare sequential vs parallel tuning search run times.
//!
//! Run with: `cargo bench --bench search_parallel`
//! Or quick comparison: `cargo run --bin benchmark_search` (see src/bin)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unkillable::combat::BattleConfig;
use unkillable::data::{builtin_champions, find_champion, BossLevel, Champion};
use unkillable::optimizer::{SearchConfig, TuningSearch};
use unkillable::parallel::WorkerPool;

fn search() -> TuningSearch {
    let catalog = builtin_champions();
    let team: Vec<Champion> = ["Maneater", "Skullcrusher"]
        .iter()
        .filter_map(|name| find_champion(&catalog, name).cloned())
        .collect();
    let config = SearchConfig {
        max_delta_step: 4,
        max_speed_sets: 1,
        batch_size: 32,
        ..SearchConfig::default()
    };
    TuningSearch::new(team, BattleConfig::default(), config)
}

fn bench_search_sequential_vs_parallel(c: &mut Criterion) {
    let search = search();
    let level = BossLevel::UltraNightmare;

    let mut group = c.benchmark_group("tuning_search");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(search.search(level).count()));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(search.search_parallel(level, &WorkerPool::default_workers())));
    });

    group.finish();
}

criterion_group!(benches, bench_search_sequential_vs_parallel);
criterion_main!(benches);
