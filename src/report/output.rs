//! Probability tables over score grids.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::score::score_label;
use super::ReportError;
use crate::engine::{Result as EngineResult, WinProbabilityCalculator};

/// Probability for one score pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityRow {
    /// Player one's score
    pub score1: u32,
    /// Player two's score
    pub score2: u32,
    /// Display label for `score1` (traditional for games, numeric otherwise)
    pub label1: String,
    /// Display label for `score2`
    pub label2: String,
    /// Probability player one wins from this score
    pub probability: f64,
}

impl ProbabilityRow {
    fn numeric(score1: u32, score2: u32, probability: f64) -> Self {
        Self {
            score1,
            score2,
            label1: score1.to_string(),
            label2: score2.to_string(),
            probability,
        }
    }

    /// Delimited text row "label1,label2,probability".
    pub fn to_csv(&self) -> String {
        format!("{},{},{}", self.label1, self.label2, self.probability)
    }
}

/// Rows for one choice of who serves first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeOrderBlock {
    /// Whether player one served first
    pub player1_serving_first: bool,
    /// One row per score pair, score1-major
    pub rows: Vec<ProbabilityRow>,
}

impl ServeOrderBlock {
    fn render(&self, out: &mut String) {
        out.push_str(&format!(
            "Player1 serving first : {}\n",
            self.player1_serving_first
        ));
        for row in &self.rows {
            out.push_str(&row.to_csv());
            out.push('\n');
        }
    }
}

/// Game win probabilities at every regular point score plus both advantages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTable {
    /// Point-win probability the table was computed with
    pub point_win_prob: f64,
    /// One row per score pair
    pub rows: Vec<ProbabilityRow>,
}

impl GameTable {
    /// Score pairs covered: 0..=3 x 0..=3, then Ad-40 and 40-Ad.
    pub fn score_pairs() -> Vec<(u32, u32)> {
        let mut pairs: Vec<(u32, u32)> = (0..4)
            .flat_map(|a| (0..4).map(move |b| (a, b)))
            .collect();
        pairs.push((4, 3));
        pairs.push((3, 4));
        pairs
    }

    /// Compute the table for one point-win probability.
    pub fn compute(calculator: &WinProbabilityCalculator, point_win_prob: f64) -> EngineResult<Self> {
        let rows = Self::score_pairs()
            .into_iter()
            .map(|(a, b)| {
                let probability = calculator.game_probability(a, b, point_win_prob)?;
                Ok(ProbabilityRow {
                    score1: a,
                    score2: b,
                    label1: score_label(a),
                    label2: score_label(b),
                    probability,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            point_win_prob,
            rows,
        })
    }

    /// Render as delimited text.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Player1's probability of winning a point: {}\n",
            self.point_win_prob
        );
        for row in &self.rows {
            out.push_str(&row.to_csv());
            out.push('\n');
        }
        out
    }
}

/// Set win probabilities over 0..=6 x 0..=6 games, for both serve orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTable {
    /// Player one's service-point win probability
    pub service_prob: f64,
    /// Player one's return-point win probability
    pub return_prob: f64,
    /// Returning first, then serving first
    pub blocks: Vec<ServeOrderBlock>,
}

impl SetTable {
    /// Compute the table for fixed serve/return probabilities.
    pub fn compute(
        calculator: &WinProbabilityCalculator,
        service_prob: f64,
        return_prob: f64,
    ) -> EngineResult<Self> {
        let blocks = grid_blocks(7, |a, b, first| {
            calculator.set_probability(a, b, service_prob, return_prob, first)
        })?;
        Ok(Self {
            service_prob,
            return_prob,
            blocks,
        })
    }

    /// Render as delimited text.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Player1 service point {} / return point {}\n",
            self.service_prob, self.return_prob
        );
        for block in &self.blocks {
            block.render(&mut out);
        }
        out
    }
}

/// Tiebreak win probabilities over 0..target x 0..target points, for both serve orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiebreakTable {
    /// Player one's service-point win probability
    pub service_prob: f64,
    /// Player one's return-point win probability
    pub return_prob: f64,
    /// Points needed to win the tiebreak
    pub target: u32,
    /// Returning first, then serving first
    pub blocks: Vec<ServeOrderBlock>,
}

impl TiebreakTable {
    /// Compute the table for fixed serve/return probabilities.
    pub fn compute(
        calculator: &WinProbabilityCalculator,
        service_prob: f64,
        return_prob: f64,
    ) -> EngineResult<Self> {
        let target = calculator.config().tiebreak_target;
        let blocks = grid_blocks(target, |a, b, first| {
            calculator.tiebreak_probability_to(a, b, service_prob, return_prob, first, target)
        })?;
        Ok(Self {
            service_prob,
            return_prob,
            target,
            blocks,
        })
    }

    /// Render as delimited text.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Tiebreak to {}, service point {} / return point {}\n",
            self.target, self.service_prob, self.return_prob
        );
        for block in &self.blocks {
            block.render(&mut out);
        }
        out
    }
}

/// Evaluate `f` over `0..size` x `0..size` for player one returning first,
/// then serving first. Cells are evaluated in parallel; row order is kept.
fn grid_blocks<F>(size: u32, f: F) -> EngineResult<Vec<ServeOrderBlock>>
where
    F: Fn(u32, u32, bool) -> EngineResult<f64> + Sync,
{
    [false, true]
        .into_iter()
        .map(|first| {
            let cells: Vec<(u32, u32)> = (0..size)
                .flat_map(|a| (0..size).map(move |b| (a, b)))
                .collect();
            let rows = cells
                .par_iter()
                .map(|&(a, b)| Ok(ProbabilityRow::numeric(a, b, f(a, b, first)?)))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(ServeOrderBlock {
                player1_serving_first: first,
                rows,
            })
        })
        .collect()
}

/// Every table produced by one driver run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Game table, if selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameTable>,
    /// Set table, if selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<SetTable>,
    /// Tiebreak table, if selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiebreak: Option<TiebreakTable>,
}

impl Report {
    /// All selected tables as delimited text, separated by blank lines.
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if let Some(game) = &self.game {
            sections.push(game.render());
        }
        if let Some(set) = &self.set {
            sections.push(set.render());
        }
        if let Some(tiebreak) = &self.tiebreak {
            sections.push(tiebreak.render());
        }
        sections.join("\n")
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load from JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_table_layout() {
        let table = GameTable::compute(&WinProbabilityCalculator::default(), 0.59).unwrap();
        assert_eq!(table.rows.len(), 18);
        assert_eq!(table.rows[0].label1, "0");
        assert_eq!(table.rows[15].to_csv().split(',').take(2).collect::<Vec<_>>(), vec!["40", "40"]);
        assert_eq!(table.rows[16].label1, "Ad");
        assert_eq!(table.rows[17].label2, "Ad");
        assert!(table.render().starts_with("Player1's probability of winning a point: 0.59\n"));
    }

    #[test]
    fn test_set_table_covers_both_serve_orders() {
        let table = SetTable::compute(&WinProbabilityCalculator::default(), 0.59, 0.44).unwrap();
        assert_eq!(table.blocks.len(), 2);
        assert!(!table.blocks[0].player1_serving_first);
        assert!(table.blocks[1].player1_serving_first);
        for block in &table.blocks {
            assert_eq!(block.rows.len(), 49);
            // Row order is score1-major even though cells run in parallel.
            assert_eq!((block.rows[8].score1, block.rows[8].score2), (1, 1));
            assert_eq!(block.rows[6].to_csv(), "0,6,0");
        }
        let text = table.render();
        assert!(text.contains("Player1 serving first : false\n0,0,"));
        assert!(text.contains("Player1 serving first : true\n"));
    }

    #[test]
    fn test_tiebreak_table_uses_configured_target() {
        let calculator = WinProbabilityCalculator::new(
            crate::engine::EngineConfig::default().with_tiebreak_target(3),
        )
        .unwrap();
        let table = TiebreakTable::compute(&calculator, 0.6, 0.4).unwrap();
        assert_eq!(table.target, 3);
        assert_eq!(table.blocks[0].rows.len(), 9);
    }

    #[test]
    fn test_saved_json_omits_unselected_tables() {
        let calculator = WinProbabilityCalculator::default();
        let report = Report {
            game: Some(GameTable::compute(&calculator, 0.6).unwrap()),
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.save_json(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("set").is_none());
        assert_eq!(raw["game"]["rows"].as_array().unwrap().len(), 18);

        let loaded = Report::load_json(&path).unwrap();
        let game = loaded.game.unwrap();
        assert!((game.rows[0].probability - 0.7357).abs() < 1e-4);
    }
}
