//! Reporting on top of the engine.
//!
//! Enumerates score grids, renders them as `s1,s2,probability` rows and
//! exports them as JSON. Nothing here affects the probabilities themselves.

pub mod config;
pub mod output;
pub mod score;

use thiserror::Error;
use tracing::info;

use crate::engine::{ProbabilityError, WinProbabilityCalculator};

pub use config::{ReportConfig, ReportKind, DEFAULT_RETURN_PROB, DEFAULT_SERVICE_PROB};
pub use output::{GameTable, ProbabilityRow, Report, ServeOrderBlock, SetTable, TiebreakTable};
pub use score::{score_label, traditional_score};

/// Errors from building, loading or saving reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Invalid inputs or a failed evaluation.
    #[error("probability error: {0}")]
    Probability(#[from] ProbabilityError),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compute every report selected in `config`.
pub fn run(config: &ReportConfig) -> Result<Report, ReportError> {
    config.validate()?;
    let calculator = WinProbabilityCalculator::new(config.engine.clone())?;
    let mut report = Report::default();

    for &kind in &config.reports {
        info!(?kind, "computing report");
        match kind {
            ReportKind::Game => {
                report.game = Some(GameTable::compute(&calculator, config.service_prob)?);
            }
            ReportKind::Set => {
                report.set = Some(SetTable::compute(
                    &calculator,
                    config.service_prob,
                    config.return_prob,
                )?);
            }
            ReportKind::Tiebreak => {
                report.tiebreak = Some(TiebreakTable::compute(
                    &calculator,
                    config.service_prob,
                    config.return_prob,
                )?);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_is_game_only() {
        let report = run(&ReportConfig::default()).unwrap();
        assert!(report.game.is_some());
        assert!(report.set.is_none());
        assert!(report.tiebreak.is_none());
    }

    #[test]
    fn test_run_rejects_invalid_probability() {
        let config = ReportConfig {
            service_prob: -0.2,
            ..Default::default()
        };
        assert!(matches!(run(&config), Err(ReportError::Probability(_))));
    }
}
