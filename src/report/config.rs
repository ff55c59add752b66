//! Driver configuration: which reports to run and with what inputs.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ReportError;
use crate::engine::error::check_probability;
use crate::engine::EngineConfig;

/// Example service-point win probability for player one.
pub const DEFAULT_SERVICE_PROB: f64 = 0.59;

/// Example return-point win probability for player one.
pub const DEFAULT_RETURN_PROB: f64 = 0.44;

/// A report the driver can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Game probabilities at every point score, using the service probability.
    Game,
    /// Set probabilities at every game score, both serve orders.
    Set,
    /// Tiebreak probabilities at every point score, both serve orders.
    Tiebreak,
}

/// Configuration for a driver run.
///
/// # Example
/// ```
/// use tennis_win_prob::report::{ReportConfig, ReportKind};
///
/// let config = ReportConfig::default();
/// assert_eq!(config.reports, vec![ReportKind::Game]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Probability player one wins a point on serve.
    pub service_prob: f64,

    /// Probability player one wins a point on return.
    pub return_prob: f64,

    /// Reports to run, in order.
    pub reports: Vec<ReportKind>,

    /// Engine settings shared by every report.
    pub engine: EngineConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            service_prob: DEFAULT_SERVICE_PROB,
            return_prob: DEFAULT_RETURN_PROB,
            reports: vec![ReportKind::Game],
            engine: EngineConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a JSON file; missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let file = File::open(path)?;
        let config: ReportConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the probabilities and engine settings.
    pub fn validate(&self) -> Result<(), ReportError> {
        check_probability("service", self.service_prob)?;
        check_probability("return", self.return_prob)?;
        self.engine.validate()?;
        Ok(())
    }

    /// Whether `kind` is among the selected reports.
    pub fn runs(&self, kind: ReportKind) -> bool {
        self.reports.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"service_prob": 0.65, "reports": ["set", "tiebreak"], "engine": {{"deep_tie_policy": "exact"}}}}"#
        )
        .unwrap();

        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config.service_prob, 0.65);
        assert_eq!(config.return_prob, DEFAULT_RETURN_PROB);
        assert!(config.runs(ReportKind::Set));
        assert!(!config.runs(ReportKind::Game));
        assert_eq!(config.engine.deep_tie_policy, crate::engine::DeepTiePolicy::Exact);
    }

    #[test]
    fn test_load_rejects_bad_probability() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"return_prob": 1.5}}"#).unwrap();
        let err = ReportConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::Probability(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load("/nonexistent/report.json").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
