//! grid_city — plain vs. weighted traffic on a small city grid.
//!
//! Runs both variants on the same 10×10 road layout with the same seed and
//! compares how often roads sit exactly at capacity.  Pass a JSON
//! `SimConfig` path as the first argument to override the defaults; the
//! layout is always the 10×10 city below, so `rows`/`cols` must stay 10.
//!
//! Set `RUST_LOG=debug` for per-tick logs or `RUST_LOG=tg_sim=warn` to see
//! gridlocked flows only.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tg_core::SimConfig;
use tg_grid::Matrix;
use tg_output::{CsvWriter, SimOutputObserver, history_full_cells};
use tg_sim::{Sim, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROWS:        usize = 10;
const COLS:        usize = 10;
const DENSITY:     f64   = 0.1;
const SEED:        u64   = 42;
const TOTAL_TICKS: u64   = 100;

const OUTPUT_DIR: &str = "output/grid_city";

// ── Layout ────────────────────────────────────────────────────────────────────

/// Two narrow north-south streets (columns 2 and 8), a medium east-west
/// street (row 3), and a wide avenue down column 5.  Later fills win at
/// crossings.
fn city_layout() -> Result<Matrix<u32>> {
    let mut layout = Matrix::new(ROWS, COLS);
    layout.fill_col(2, 2)?;
    layout.fill_col(8, 2)?;
    layout.fill_row(3, 3)?;
    layout.fill_col(5, 4)?;
    Ok(layout)
}

fn load_config() -> Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config: SimConfig = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {path}"))?;
            Ok(config)
        }
        None => Ok(SimConfig {
            rows:        ROWS,
            cols:        COLS,
            density:     DENSITY,
            seed:        SEED,
            total_ticks: TOTAL_TICKS,
        }),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

// ── Run one variant ───────────────────────────────────────────────────────────

struct RunSummary {
    full_cells: usize,
    spawned:    u64,
    elapsed:    f64,
}

fn run_variant(name: &str, config: &SimConfig, weighted: bool) -> Result<(Sim, RunSummary)> {
    let mut sim = SimBuilder::new(config.clone(), city_layout()?)
        .weighted(weighted)
        .build()?;

    let writer = CsvWriter::new(&Path::new(OUTPUT_DIR).join(name))?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed().as_secs_f64();

    if let Some(e) = obs.take_error() {
        eprintln!("output error ({name}): {e}");
    }

    let full_cells = history_full_cells(sim.history(), sim.capacities());
    debug_assert_eq!(full_cells, obs.total_full_cells());
    let spawned = sim.flows_spawned();
    info!(variant = name, full_cells, "variant finished");

    Ok((sim, RunSummary { full_cells, spawned, elapsed }))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;

    println!("=== grid_city — traffic_grid demo ===");
    println!(
        "Grid: {}x{}  |  Density: {}  |  Target flows: {}  |  Ticks: {}  |  Seed: {}",
        config.rows,
        config.cols,
        config.density,
        config.target_flows(),
        config.total_ticks,
        config.seed,
    );
    println!();

    let (plain, plain_summary) = run_variant("plain", &config, false)?;
    let (weighted, weighted_summary) = run_variant("weighted", &config, true)?;

    println!("{:<10} {:>12} {:>14} {:>10}", "Variant", "Full cells", "Flows seen", "Time (s)");
    println!("{}", "-".repeat(50));
    for (name, s) in [("plain", &plain_summary), ("weighted", &weighted_summary)] {
        println!("{:<10} {:>12} {:>14} {:>10.3}", name, s.full_cells, s.spawned, s.elapsed);
    }
    println!();

    // final volume grid of each variant, '.' for road-less cells
    for (name, sim) in [("plain", &plain), ("weighted", &weighted)] {
        println!("Final volumes ({name}):");
        for row in 0..sim.capacities().rows() {
            let line: Vec<String> = sim
                .capacities()
                .row(row)
                .iter()
                .zip(sim.volumes().row(row))
                .map(|(&c, &v)| if c == 0 { " .".to_owned() } else { format!("{v:>2}") })
                .collect();
            println!("  {}", line.join(" "));
        }
        println!();
    }

    println!("CSV output written to {OUTPUT_DIR}/{{plain,weighted}}");
    Ok(())
}
