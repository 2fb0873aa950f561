//! Batch runs over several initial boards, heuristics and search modes.

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::heuristic::Heuristic;
use crate::solver::{search, SearchConfig, SearchMode, SearchStatus};

/// Initial boards used by the original coursework experiments (0 is the blank).
pub const DEFAULT_INITIAL_BOARDS: [[u8; 9]; 5] = [
    [1, 2, 0, 3, 4, 5, 6, 7, 8],
    [1, 2, 3, 4, 5, 6, 0, 7, 8],
    [8, 6, 7, 2, 5, 4, 3, 0, 1],
    [0, 3, 4, 8, 1, 2, 7, 6, 5],
    [5, 4, 0, 6, 1, 8, 7, 3, 2],
];

pub fn default_initial_boards() -> Vec<Board> {
    DEFAULT_INITIAL_BOARDS
        .iter()
        .filter_map(|cells| Board::new(cells).ok())
        .collect()
}

/// One search run inside an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub index: usize,
    pub initial: Board,
    pub status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution_length: Option<usize>,
    pub steps: usize,
    pub nodes_generated: usize,
}

/// All runs for one (mode, heuristic) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicSummary {
    pub mode: SearchMode,
    pub heuristic: String,
    pub runs: Vec<RunRecord>,
    pub solved: usize,
    /// Mean solution length over solved runs; `None` if nothing was solved
    pub average_solution_length: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentReport {
    pub step_limit: usize,
    pub summaries: Vec<HeuristicSummary>,
}

impl ExperimentReport {
    /// First summary matching `mode` and the heuristic's [`Heuristic::name`].
    ///
    /// Heuristics sharing a name (unwrapped closures all report `"custom"`)
    /// collide here; label them with [`Named`](crate::heuristic::Named).
    pub fn summary(&self, mode: SearchMode, heuristic: &str) -> Option<&HeuristicSummary> {
        self.summaries
            .iter()
            .find(|s| s.mode == mode && s.heuristic == heuristic)
    }
}

/// Run every heuristic in every mode against every board.
///
/// `config.mode` is ignored; the modes come from `modes`. Summaries are ordered
/// by mode first, then heuristic, matching the input order.
pub fn run_experiment<H: Heuristic>(
    initial_boards: &[Board],
    heuristics: &[H],
    modes: &[SearchMode],
    config: &SearchConfig,
) -> ExperimentReport {
    let mut summaries = Vec::new();

    for &mode in modes {
        let run_config = SearchConfig {
            mode,
            ..config.clone()
        };

        for heuristic in heuristics {
            let runs: Vec<RunRecord> = initial_boards
                .iter()
                .enumerate()
                .map(|(index, initial)| {
                    let result = search(initial, heuristic, &run_config);
                    RunRecord {
                        index,
                        initial: *initial,
                        status: result.status,
                        solution_length: result.solution_length(),
                        steps: result.steps,
                        nodes_generated: result.nodes_generated,
                    }
                })
                .collect();

            let lengths: Vec<usize> = runs.iter().filter_map(|r| r.solution_length).collect();
            let solved = lengths.len();
            let average_solution_length = if solved > 0 {
                Some(lengths.iter().sum::<usize>() as f64 / solved as f64)
            } else {
                None
            };

            info!(
                "{:?} / {}: solved {}/{} average length {:?}",
                mode,
                heuristic.name(),
                solved,
                runs.len(),
                average_solution_length
            );

            summaries.push(HeuristicSummary {
                mode,
                heuristic: heuristic.name().to_string(),
                runs,
                solved,
                average_solution_length,
            });
        }
    }

    ExperimentReport {
        step_limit: config.step_limit,
        summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Goal;
    use crate::heuristic::{HeuristicKind, Named};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_boards_are_valid() {
        assert_eq!(default_initial_boards().len(), DEFAULT_INITIAL_BOARDS.len());
    }

    #[test]
    fn test_averages_per_heuristic() {
        let boards = vec![board("1 2 b 3 4 5 6 7 8"), board("b 3 4 8 1 2 7 6 5")];
        let report = run_experiment(
            &boards,
            &[HeuristicKind::MisplacedTiles, HeuristicKind::Manhattan],
            &[SearchMode::AStar],
            &SearchConfig::default(),
        );

        assert_eq!(report.summaries.len(), 2);
        let manhattan = report.summary(SearchMode::AStar, "manhattan").unwrap();
        assert_eq!(manhattan.solved, 2);
        assert_eq!(manhattan.average_solution_length, Some(9.0));
        assert_eq!(manhattan.runs[1].solution_length, Some(16));

        let misplaced = report.summary(SearchMode::AStar, "misplaced-tiles").unwrap();
        assert_eq!(misplaced.average_solution_length, Some(9.0));
        assert!(report.summary(SearchMode::BestFirst, "manhattan").is_none());
    }

    #[test]
    fn test_named_closures_get_separate_summaries() {
        fn zero(_: &Board, _: &Goal) -> u32 {
            0
        }
        fn misplaced(b: &Board, g: &Goal) -> u32 {
            crate::heuristic::misplaced_tiles(b, g)
        }

        let boards = vec![board("1 2 b 3 4 5 6 7 8")];
        let heuristics: Vec<Named<fn(&Board, &Goal) -> u32>> = vec![
            Named::new("zero", zero as fn(&Board, &Goal) -> u32),
            Named::new("misplaced", misplaced as fn(&Board, &Goal) -> u32),
        ];
        let report = run_experiment(
            &boards,
            &heuristics,
            &[SearchMode::AStar],
            &SearchConfig::default(),
        );

        assert_eq!(report.summaries.len(), 2);
        let zero_summary = report.summary(SearchMode::AStar, "zero").unwrap();
        let misplaced_summary = report.summary(SearchMode::AStar, "misplaced").unwrap();
        assert_eq!(zero_summary.heuristic, "zero");
        assert_eq!(misplaced_summary.heuristic, "misplaced");
        assert_eq!(zero_summary.average_solution_length, Some(2.0));
        assert!(zero_summary.runs[0].steps > misplaced_summary.runs[0].steps);
        assert!(report.summary(SearchMode::AStar, "custom").is_none());
    }

    #[test]
    fn test_unsolved_runs_are_reported_not_averaged() {
        let boards = vec![board("1 2 3 4 5 6 b 7 8")];
        let config = SearchConfig {
            step_limit: 5,
            ..Default::default()
        };
        let report = run_experiment(
            &boards,
            &[HeuristicKind::Manhattan],
            &SearchMode::ALL,
            &config,
        );

        assert_eq!(report.summaries.len(), 2);
        for summary in &report.summaries {
            assert_eq!(summary.solved, 0);
            assert_eq!(summary.average_solution_length, None);
            assert_eq!(summary.runs[0].status, SearchStatus::StepLimitReached);
        }

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stepLimit"], 5);
        assert_eq!(json["summaries"][0]["mode"], "best-first");
        assert_eq!(json["summaries"][0]["runs"][0]["status"], "step_limit_reached");
    }
}
