//! Win-probability report driver.
//!
//! Usage:
//!   cargo run --release --bin win_probabilities -- [OPTIONS]
//!
//! By default prints player one's game win probability at every point score
//! for a 59% service-point win rate. Examples:
//!
//!   win_probabilities --report set --report tiebreak
//!   win_probabilities --service 0.65 --return 0.38 --all --json out.json
//!   win_probabilities --config report.json --exact

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tennis_win_prob::engine::DeepTiePolicy;
use tennis_win_prob::logging;
use tennis_win_prob::report::{self, ReportConfig, ReportKind};

#[derive(Debug, Parser)]
#[command(name = "win_probabilities", about = "Tennis game, tiebreak and set win probabilities")]
struct Cli {
    /// JSON configuration file (CLI flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player one's service-point win probability
    #[arg(short, long)]
    service: Option<f64>,

    /// Player one's return-point win probability
    #[arg(short, long = "return")]
    return_prob: Option<f64>,

    /// Report to run; repeat for several
    #[arg(long = "report", value_enum)]
    reports: Vec<ReportKind>,

    /// Run every report
    #[arg(long, conflicts_with = "reports")]
    all: bool,

    /// Tiebreak target for the set and tiebreak reports
    #[arg(short, long)]
    target: Option<u32>,

    /// Resolve deep tiebreak ties exactly instead of cutting off at 0.5
    #[arg(long)]
    exact: bool,

    /// Also write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(ReportConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(service) = self.service {
            config.service_prob = service;
        }
        if let Some(ret) = self.return_prob {
            config.return_prob = ret;
        }
        if self.all {
            config.reports = vec![ReportKind::Game, ReportKind::Set, ReportKind::Tiebreak];
        } else if !self.reports.is_empty() {
            config.reports = self.reports;
        }
        if let Some(target) = self.target {
            config.engine.tiebreak_target = target;
        }
        if self.exact {
            config.engine.deep_tie_policy = DeepTiePolicy::Exact;
        }

        config.validate()?;
        Ok((config, self.json))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let (config, json_path) = cli.into_config()?;
    info!(
        service = config.service_prob,
        ret = config.return_prob,
        reports = ?config.reports,
        "starting"
    );

    let start = Instant::now();
    let report = report::run(&config)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "reports computed");

    print!("{}", report.render());

    if let Some(path) = json_path {
        report
            .save_json(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "saved JSON");
    }

    Ok(())
}
