//! Run the tuning search once sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_search [level] [workers]

use std::time::Instant;

use chrono::Utc;
use unkillable::combat::BattleConfig;
use unkillable::data::{builtin_champions, find_champion, BossLevel, Champion};
use unkillable::optimizer::{SearchConfig, TuningCandidate, TuningSearch};
use unkillable::parallel::WorkerPool;

const TEAM: [&str; 2] = ["Maneater", "Skullcrusher"];

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let level = args
        .get(1)
        .and_then(|raw| raw.parse::<BossLevel>().ok())
        .unwrap_or(BossLevel::UltraNightmare);
    let workers = args
        .get(2)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(0);

    let catalog = builtin_champions();
    let team: Vec<Champion> = TEAM
        .iter()
        .filter_map(|name| find_champion(&catalog, name).cloned())
        .collect();
    let config = SearchConfig {
        max_delta_step: 8,
        max_speed_sets: 1,
        workers,
        ..SearchConfig::default()
    };
    let search = TuningSearch::new(team, BattleConfig::default(), config);
    let n = search.candidates().total();

    println!("[{}] tuning search: {} candidates (level={})", Utc::now().to_rfc3339(), n, level);
    println!();

    // Sequential
    let t0 = Instant::now();
    let results_seq: Vec<TuningCandidate> = match search.search(level).collect() {
        Ok(results) => results,
        Err(err) => {
            eprintln!("sequential search failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!("Sequential:  {:.2} ms  ({:.1} battles/s)", seq_ms, n as f64 / elapsed_seq.as_secs_f64());

    // Parallel
    let t0 = Instant::now();
    let results_par = match search.search_parallel(level, &WorkerPool::with_workers(workers)) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("parallel search failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!("Parallel:    {:.2} ms  ({:.1} battles/s)", par_ms, n as f64 / elapsed_par.as_secs_f64());

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);
    println!("Accepted:    {}", results_par.len());

    if results_seq != results_par {
        eprintln!("sequential and parallel searches disagree");
        std::process::exit(1);
    }
    println!("(Results match sequential vs parallel)");
}
