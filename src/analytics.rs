//! Derived, read-only race comparison.
//!
//! Everything here is a pure function of store state; reports cannot mutate
//! or steer the race. Formulas follow the original analytics view, including
//! the zero-node guards.

use std::time::Duration;

use crate::dispatch::Arena;
use crate::protocol::AgentType;

/// Metrics for one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneReport {
    pub agent: AgentType,
    pub model_id: String,
    pub nodes_explored: usize,
    pub path_depth: usize,
    /// `depth / nodes`; 0 when nothing was explored.
    pub avg_click_depth: f64,
    /// `depth / nodes * 100`; 0 when nothing was explored.
    pub efficiency_pct: f64,
    /// Finish instant minus race start; present only for a finished lane.
    pub time_to_complete: Option<Duration>,
}

/// Cross-lane comparison of the whole race.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceReport {
    pub winner: Option<AgentType>,
    pub bfs: LaneReport,
    pub dfs: LaneReport,
    /// Which lane found the shorter path, when both have one.
    pub shorter_path: Option<AgentType>,
    /// Which lane explored fewer nodes, when both explored any.
    pub more_selective: Option<AgentType>,
    /// Which lane has the higher efficiency, when both explored any.
    pub more_efficient: Option<AgentType>,
}

impl RaceReport {
    pub fn from_arena(arena: &Arena) -> Self {
        let bfs = lane_report(arena, AgentType::Bfs);
        let dfs = lane_report(arena, AgentType::Dfs);

        let both_have_depth = bfs.path_depth > 0 && dfs.path_depth > 0;
        let shorter_path = both_have_depth.then(|| {
            if bfs.path_depth <= dfs.path_depth {
                AgentType::Bfs
            } else {
                AgentType::Dfs
            }
        });

        let both_explored = bfs.nodes_explored > 0 && dfs.nodes_explored > 0;
        let more_selective = both_explored.then(|| {
            if bfs.nodes_explored < dfs.nodes_explored {
                AgentType::Bfs
            } else {
                AgentType::Dfs
            }
        });
        let more_efficient = both_explored.then(|| {
            if bfs.efficiency_pct > dfs.efficiency_pct {
                AgentType::Bfs
            } else {
                AgentType::Dfs
            }
        });

        Self {
            winner: arena.session().winner(),
            bfs,
            dfs,
            shorter_path,
            more_selective,
            more_efficient,
        }
    }
}

fn lane_report(arena: &Arena, agent: AgentType) -> LaneReport {
    let lane = arena.lane(agent);
    let nodes = lane.progress.visited_count;
    let depth = lane.progress.depth;
    let ratio = if nodes > 0 {
        depth as f64 / nodes as f64
    } else {
        0.0
    };
    let time_to_complete = match (
        arena.session().start_timestamp(),
        lane.progress.finish_timestamp,
    ) {
        (Some(started), Some(finished)) => Some(finished.duration_since(started)),
        _ => None,
    };

    LaneReport {
        agent,
        model_id: lane.progress.model_id.clone(),
        nodes_explored: nodes,
        path_depth: depth,
        avg_click_depth: ratio,
        efficiency_pct: ratio * 100.0,
        time_to_complete,
    }
}
