//! Sensitivity sweep over the service-point win probability.
//!
//! Holds the return-point probability fixed and reports, for each service
//! probability on a grid, how often player one holds serve, wins a
//! tiebreak and wins a set from 0-0.
//!
//! Usage:
//!   cargo run --release --bin sweep -- [--from 0.5] [--to 0.8] [--step 0.01] [--return 0.44]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use tennis_win_prob::engine::{EngineConfig, WinProbabilityCalculator};
use tennis_win_prob::logging;
use tennis_win_prob::report::DEFAULT_RETURN_PROB;

#[derive(Debug, Parser)]
#[command(name = "sweep", about = "Sweep win probabilities over service-point probability")]
struct Cli {
    /// First service probability
    #[arg(long, default_value_t = 0.5)]
    from: f64,

    /// Last service probability (inclusive)
    #[arg(long, default_value_t = 0.8)]
    to: f64,

    /// Grid step
    #[arg(long, default_value_t = 0.01)]
    step: f64,

    /// Fixed return-point probability
    #[arg(short, long = "return", default_value_t = DEFAULT_RETURN_PROB)]
    return_prob: f64,

    /// Resolve deep tiebreak ties exactly
    #[arg(long)]
    exact: bool,

    /// Write results as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct SweepPoint {
    service_prob: f64,
    hold: f64,
    tiebreak: f64,
    set_serving_first: f64,
    set_returning_first: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if cli.step <= 0.0 || cli.to < cli.from {
        bail!("need step > 0 and to >= from");
    }

    let config = if cli.exact {
        EngineConfig::exact()
    } else {
        EngineConfig::default()
    };
    let calculator = WinProbabilityCalculator::new(config)?;

    let steps = ((cli.to - cli.from) / cli.step).round() as usize + 1;
    let grid: Vec<f64> = (0..steps)
        .map(|i| (cli.from + i as f64 * cli.step).min(cli.to))
        .collect();
    info!(points = grid.len(), ret = cli.return_prob, "starting sweep");

    let pb = ProgressBar::new(grid.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let start = Instant::now();
    let results = grid
        .par_iter()
        .map(|&service| {
            let ret = cli.return_prob;
            let point = SweepPoint {
                service_prob: service,
                hold: calculator.game_probability(0, 0, service)?,
                tiebreak: calculator.tiebreak_probability(0, 0, service, ret, true)?,
                set_serving_first: calculator.set_probability(0, 0, service, ret, true)?,
                set_returning_first: calculator.set_probability(0, 0, service, ret, false)?,
            };
            pb.inc(1);
            Ok(point)
        })
        .collect::<tennis_win_prob::engine::Result<Vec<_>>>()?;
    pb.finish_with_message("done");
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "sweep finished");

    println!("service,hold,tiebreak,set_serving_first,set_returning_first");
    for p in &results {
        println!(
            "{:.3},{:.6},{:.6},{:.6},{:.6}",
            p.service_prob, p.hold, p.tiebreak, p.set_serving_first, p.set_returning_first
        );
    }

    if let Some(path) = cli.json {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "saved JSON");
    }

    Ok(())
}
