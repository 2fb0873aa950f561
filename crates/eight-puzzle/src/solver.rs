//! Best-first and A* search over puzzle boards.
//!
//! One engine serves both modes; they differ only in how a node's total cost
//! is computed. Nodes live in an arena owned by the [`SearchResult`], and each
//! node refers to its parent by index. That is enough to rebuild the solution
//! path once the goal has been popped.
//!
//! A board that is already explored or already queued is never queued again,
//! even when a cheaper path to it turns up later. There is no decrease-key, so
//! A* can return a longer-than-optimal path on some instances.

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Direction, Goal};
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;

/// Default cap on node expansions per run.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Index of a node in the search arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// How a node's total cost is derived from its path and heuristic costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Greedy best-first search: f = h
    BestFirst,
    /// A* search: f = g + h
    AStar,
}

impl SearchMode {
    pub const ALL: [SearchMode; 2] = [SearchMode::BestFirst, SearchMode::AStar];

    /// Saturates at `u32::MAX` for very large estimates.
    pub fn total_cost(self, path_cost: u32, heuristic_cost: u32) -> u32 {
        match self {
            SearchMode::BestFirst => heuristic_cost,
            SearchMode::AStar => path_cost.saturating_add(heuristic_cost),
        }
    }
}

/// Configuration for a single search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Greedy or A*
    pub mode: SearchMode,
    /// Maximum number of expansions before giving up
    pub step_limit: usize,
    /// Board the search is trying to reach
    pub goal: Goal,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::AStar,
            step_limit: DEFAULT_STEP_LIMIT,
            goal: Goal::default(),
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal board was popped from the frontier
    GoalFound,
    /// Every reachable board was expanded without meeting the goal
    Exhausted,
    /// The expansion budget ran out first
    StepLimitReached,
}

/// A node in the search arena. Never modified after it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// Move that produced this node from its parent
    pub action: Option<Direction>,
    /// g: moves from the root
    pub path_cost: u32,
    /// h: heuristic estimate
    pub heuristic_cost: u32,
    /// f: the frontier priority
    pub total_cost: u32,
}

/// A board one move away from an expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    pub board: Board,
    pub action: Direction,
    pub path_cost: u32,
}

/// Generate the successors of `node` in up, down, left, right order.
///
/// Yields 2 for a corner blank, 3 for an edge blank and 4 for the centre.
pub fn expand(node: &SearchNode) -> SmallVec<[Successor; 4]> {
    node.board
        .neighbors()
        .map(|(action, board)| Successor {
            board,
            action,
            path_cost: node.path_cost.saturating_add(1),
        })
        .collect()
}

/// Outcome of a search run, including the node arena.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Number of nodes expanded
    pub steps: usize,
    /// Number of nodes created, root included
    pub nodes_generated: usize,
    /// Largest frontier size seen
    pub max_frontier_len: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
    nodes: Vec<SearchNode>,
    goal_node: Option<NodeId>,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::GoalFound
    }

    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// The goal node, when the goal was reached.
    pub fn goal_node(&self) -> Option<&SearchNode> {
        self.goal_node.and_then(|id| self.node(id))
    }

    /// Walk from `id` back to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            nodes: &self.nodes,
            next: Some(id),
        }
    }

    /// Root-to-goal nodes, inclusive at both ends.
    pub fn solution_path(&self) -> Option<Vec<&SearchNode>> {
        let mut path: Vec<&SearchNode> = self.ancestors(self.goal_node?).collect();
        path.reverse();
        Some(path)
    }

    /// Number of moves in the solution.
    pub fn solution_length(&self) -> Option<usize> {
        self.solution_path().map(|path| path.len() - 1)
    }

    /// Moves from the initial board to the goal.
    pub fn moves(&self) -> Option<Vec<Direction>> {
        self.solution_path()
            .map(|path| path.iter().filter_map(|node| node.action).collect())
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
    nodes: &'a [SearchNode],
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?.0)?;
        self.next = node.parent;
        Some(node)
    }
}

/// Search from `initial` toward `config.goal`, ordering the frontier with
/// `heuristic`.
///
/// Running out of frontier or running out of steps is reported through
/// [`SearchResult::status`]. Neither is an error.
pub fn search<H>(initial: &Board, heuristic: &H, config: &SearchConfig) -> SearchResult
where
    H: Heuristic + ?Sized,
{
    let start_time = Instant::now();
    let goal = &config.goal;

    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut frontier = Frontier::new();
    let mut explored: HashSet<Board> = HashSet::new();
    let mut steps: usize = 0;
    let mut max_frontier_len: usize = 0;

    let root_h = heuristic.estimate(initial, goal);
    let root = SearchNode {
        board: *initial,
        parent: None,
        action: None,
        path_cost: 0,
        heuristic_cost: root_h,
        total_cost: config.mode.total_cost(0, root_h),
    };
    nodes.push(root);
    frontier.push(root.board, root.total_cost, NodeId(0));

    debug!(
        "search start: board=({}) heuristic={} mode={:?} step_limit={}",
        initial,
        heuristic.name(),
        config.mode,
        config.step_limit
    );

    let (status, goal_node) = loop {
        max_frontier_len = max_frontier_len.max(frontier.len());

        if frontier.is_empty() {
            break (SearchStatus::Exhausted, None);
        }

        if steps >= config.step_limit {
            warn!(
                "step limit {} reached with {} boards still queued",
                config.step_limit,
                frontier.len()
            );
            break (SearchStatus::StepLimitReached, None);
        }

        let id = match frontier.pop() {
            Some(id) => id,
            None => break (SearchStatus::Exhausted, None),
        };
        let node = nodes[id.0];

        if goal.is_goal(&node.board) {
            break (SearchStatus::GoalFound, Some(id));
        }

        explored.insert(node.board);

        for successor in expand(&node) {
            if explored.contains(&successor.board) || frontier.contains(&successor.board) {
                continue;
            }

            let h = heuristic.estimate(&successor.board, goal);
            let child_id = NodeId(nodes.len());
            let child = SearchNode {
                board: successor.board,
                parent: Some(id),
                action: Some(successor.action),
                path_cost: successor.path_cost,
                heuristic_cost: h,
                total_cost: config.mode.total_cost(successor.path_cost, h),
            };
            nodes.push(child);
            frontier.push(child.board, child.total_cost, child_id);
        }

        trace!(
            "expanded ({}) g={} f={} frontier={}",
            node.board,
            node.path_cost,
            node.total_cost,
            frontier.len()
        );

        steps += 1;
    };

    let result = SearchResult {
        status,
        steps,
        nodes_generated: nodes.len(),
        max_frontier_len,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        nodes,
        goal_node,
    };

    debug!(
        "search end: status={:?} steps={} generated={} length={:?}",
        result.status,
        result.steps,
        result.nodes_generated,
        result.solution_length()
    );

    result
}
