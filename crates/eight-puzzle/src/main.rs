//! CLI entry point for the 8-puzzle solver.
//!
//! Usage:
//!   eight-puzzle solve <puzzle.json> [options]
//!   eight-puzzle solve --stdin [options]
//!   eight-puzzle solve --board "1 2 b 3 4 5 6 7 8" [options]
//!   eight-puzzle experiment [boards.json] [options]
//!
//! Options:
//!   --heuristic <name>   misplaced-tiles | manhattan | misplaced-row-column (default: manhattan)
//!   --mode <mode>        best-first | a-star (default: a-star)
//!   --max-steps <n>      Maximum node expansions (default: 1000000)
//!   --goal <cells>       Goal layout (default: "b 1 2 3 4 5 6 7 8")
//!   --verify-optimal     Also compute the optimal length with breadth-first search
//!
//! Set RUST_LOG=debug for search progress on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::warn;
use serde::{Deserialize, Serialize};

use eight_puzzle::bfs::shortest_path_length;
use eight_puzzle::experiment::{default_initial_boards, run_experiment};
use eight_puzzle::parity::is_solvable;
use eight_puzzle::solver::DEFAULT_STEP_LIMIT;
use eight_puzzle::{
    search, verify_solution, Board, Direction, Goal, Heuristic, HeuristicKind, SearchConfig,
    SearchMode, SearchStatus,
};

#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(about = "Best-first and A* solver for the 8-puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single board
    Solve {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Board cells given inline, row-major, `b` for the blank
        #[arg(long, value_name = "CELLS", conflicts_with_all = ["file", "stdin"])]
        board: Option<Board>,

        /// Heuristic used to order the frontier
        #[arg(long, value_enum, default_value_t = HeuristicKind::Manhattan)]
        heuristic: HeuristicKind,

        /// Search mode
        #[arg(long, value_enum, default_value_t = SearchMode::AStar)]
        mode: SearchMode,

        /// Maximum node expansions
        #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
        max_steps: usize,

        /// Goal layout, overriding any goal in the puzzle file
        #[arg(long, value_name = "CELLS")]
        goal: Option<Board>,

        /// Report the breadth-first optimal length alongside the result
        #[arg(long)]
        verify_optimal: bool,
    },

    /// Run every heuristic in both modes over a batch of boards
    Experiment {
        /// Path to batch JSON file; the coursework boards are used when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Maximum node expansions per run
        #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
        max_steps: usize,

        /// Goal layout, overriding any goal in the batch file
        #[arg(long, value_name = "CELLS")]
        goal: Option<Board>,
    },
}

/// Puzzle file format
#[derive(Debug, Deserialize)]
struct PuzzleInput {
    board: Board,
    #[serde(default)]
    goal: Option<Board>,
}

/// Batch file format
#[derive(Debug, Deserialize)]
struct BatchInput {
    boards: Vec<Board>,
    #[serde(default)]
    goal: Option<Board>,
}

/// Output format for a single solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    status: SearchStatus,
    heuristic: String,
    mode: SearchMode,
    solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<Direction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_length: Option<u32>,
    steps: usize,
    nodes_generated: usize,
    max_frontier_len: usize,
    time_elapsed_ms: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Solve {
            file,
            stdin,
            board,
            heuristic,
            mode,
            max_steps,
            goal,
            verify_optimal,
        } => {
            let (initial, file_goal) = match board {
                Some(board) => (board, None),
                None => {
                    let json_content = read_input(file, stdin)?;
                    let puzzle: PuzzleInput = serde_json::from_str(&json_content)
                        .context("Error parsing puzzle JSON")?;
                    (puzzle.board, puzzle.goal)
                }
            };

            let config = SearchConfig {
                mode,
                step_limit: max_steps,
                goal: goal.or(file_goal).map(Goal::new).unwrap_or_default(),
            };

            let solvable = is_solvable(&initial, &config.goal);
            if !solvable {
                warn!(
                    "board ({}) has the wrong inversion parity; the search will not reach the goal",
                    initial
                );
            }

            let result = search(&initial, &heuristic, &config);

            if let Some(moves) = result.moves() {
                if !verify_solution(&initial, &moves, &config.goal) {
                    bail!("solver returned moves that do not reach the goal");
                }
            }

            let optimal_length = if verify_optimal && solvable {
                shortest_path_length(&initial, &config.goal)
            } else {
                None
            };

            let output = SolveOutput {
                status: result.status,
                heuristic: heuristic.name().to_string(),
                mode,
                solvable,
                solution_length: result.solution_length(),
                moves: result.moves(),
                path: result
                    .solution_path()
                    .map(|path| path.iter().map(|node| node.board.to_string()).collect()),
                optimal_length,
                steps: result.steps,
                nodes_generated: result.nodes_generated,
                max_frontier_len: result.max_frontier_len,
                time_elapsed_ms: result.time_elapsed_ms,
            };

            println!("{}", serde_json::to_string_pretty(&output)?);

            Ok(if result.is_solved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Experiment {
            file,
            max_steps,
            goal,
        } => {
            let (boards, file_goal) = match file {
                Some(path) => {
                    let json_content = read_input(Some(path), false)?;
                    let batch: BatchInput = serde_json::from_str(&json_content)
                        .context("Error parsing batch JSON")?;
                    (batch.boards, batch.goal)
                }
                None => (default_initial_boards(), None),
            };

            let config = SearchConfig {
                step_limit: max_steps,
                goal: goal.or(file_goal).map(Goal::new).unwrap_or_default(),
                ..Default::default()
            };

            let report = run_experiment(&boards, &HeuristicKind::ALL, &SearchMode::ALL, &config);
            println!("{}", serde_json::to_string_pretty(&report)?);

            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read puzzle JSON from a file or stdin
fn read_input(file: Option<PathBuf>, stdin: bool) -> anyhow::Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file {:?}", path))
    } else {
        bail!("Must provide a file path, --stdin or --board");
    }
}
