//! Inbound event dispatch: applies backend frames to the per-agent stores
//! under the session's winner lock.
//!
//! Frames are handled one at a time, in transport order, on the caller's
//! execution context; no ordering is assumed between frames tagged for
//! different agents, only FIFO within one agent's stream.

use std::time::Instant;

use tracing::debug;

use crate::progress::AgentProgress;
use crate::protocol::{AgentType, InboundMessage, StartCommand};
use crate::session::RaceSession;
use crate::snapshot::{GraphSnapshot, NodeRecord};
use crate::topic;

/// Everything the client tracks for one strategy.
#[derive(Debug, Clone)]
pub struct AgentLane {
    pub progress: AgentProgress,
    pub graph: GraphSnapshot,
}

impl AgentLane {
    fn new(model_id: impl Into<String>) -> Self {
        Self {
            progress: AgentProgress::new(model_id),
            graph: GraphSnapshot::new(),
        }
    }

    fn seed(&mut self, start_topic: &str) {
        self.progress.seed(start_topic);
        self.graph
            .seed(start_topic, Some(topic::article_url(start_topic)));
    }

    fn clear(&mut self) {
        self.progress.clear();
        self.graph.clear();
    }
}

/// What applying one inbound frame did to the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Frame was malformed or of an unknown type; no store changed.
    Discarded,
    /// Backend acknowledged the start command.
    Acknowledged,
    /// Progress and snapshot update applied for one agent.
    Updated { agent: AgentType, node: String },
    /// A winning finish; `first` marks the event that decided the race.
    Won { agent: AgentType, first: bool },
    /// A losing-agent termination notice.
    Stopped { agent: AgentType },
}

/// The reconciliation engine: one session, two independent lanes.
///
/// The arena is the sole owner and mutator of all four stores. Callers drive
/// it with [`Arena::apply`] and read state back through the accessors.
#[derive(Debug, Clone)]
pub struct Arena {
    session: RaceSession,
    bfs: AgentLane,
    dfs: AgentLane,
}

impl Arena {
    pub fn new(bfs_model: impl Into<String>, dfs_model: impl Into<String>) -> Self {
        Self {
            session: RaceSession::new(),
            bfs: AgentLane::new(bfs_model),
            dfs: AgentLane::new(dfs_model),
        }
    }

    pub fn session(&self) -> &RaceSession {
        &self.session
    }

    pub fn lane(&self, agent: AgentType) -> &AgentLane {
        match agent {
            AgentType::Bfs => &self.bfs,
            AgentType::Dfs => &self.dfs,
        }
    }

    fn lane_mut(&mut self, agent: AgentType) -> &mut AgentLane {
        match agent {
            AgentType::Bfs => &mut self.bfs,
            AgentType::Dfs => &mut self.dfs,
        }
    }

    /// Mark the session as awaiting the backend validation round-trip.
    pub fn begin_validation(&mut self) -> bool {
        self.session.begin_validation()
    }

    /// Rewind a pending validation that failed; no stores were seeded yet.
    pub fn abort_validation(&mut self) {
        self.session.abort_validation();
    }

    /// Validation succeeded: seed both lanes with the start node and enter
    /// `Running`.
    pub fn start_race(&mut self, start_topic: &str, target_topic: &str) {
        self.session.start(start_topic, target_topic, Instant::now());
        self.bfs.seed(start_topic);
        self.dfs.seed(start_topic);
    }

    /// The start command for the current session and lane models.
    pub fn start_command(&self) -> StartCommand {
        StartCommand {
            start_topic: self.session.start_topic().to_string(),
            target_topic: self.session.target_topic().to_string(),
            bfs_model: self.bfs.progress.model_id.clone(),
            dfs_model: self.dfs.progress.model_id.clone(),
        }
    }

    /// Optimistic local cancellation; returns whether a stop command should
    /// go out (true exactly once per running race).
    pub fn stop_race(&mut self) -> bool {
        self.session.stop()
    }

    /// Clear everything back to an idle arena. No-op mid-race.
    pub fn reset_arena(&mut self) -> bool {
        if !self.session.reset() {
            return false;
        }
        self.bfs.clear();
        self.dfs.clear();
        true
    }

    /// Apply one raw inbound frame. Malformed frames are dropped here and
    /// never surfaced as errors.
    pub fn apply(&mut self, raw: &str) -> Dispatch {
        let message: InboundMessage = match serde_json::from_str(raw) {
            Ok(msg) => msg,
            Err(err) => {
                debug!("dropping malformed frame: {err}");
                return Dispatch::Discarded;
            }
        };

        match message {
            InboundMessage::Start => Dispatch::Acknowledged,
            InboundMessage::Update {
                agent_type,
                node,
                parent,
                path,
                status,
                wikipedia_url,
                duration_ms,
            } => self.apply_update(agent_type, node, parent, path, &status, wikipedia_url, duration_ms),
            InboundMessage::Finish {
                agent_type,
                winner,
                final_path,
            } => self.apply_finish(agent_type, winner, final_path),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_update(
        &mut self,
        agent: AgentType,
        node: String,
        parent: Option<String>,
        path: Vec<String>,
        status: &str,
        wikipedia_url: Option<String>,
        duration_ms: Option<f64>,
    ) -> Dispatch {
        let is_target = status == "success";
        let lane = self.lane_mut(agent);

        lane.graph.insert_node(NodeRecord {
            id: node.clone(),
            is_start: false,
            is_target,
            source_url: wikipedia_url,
            discovered_at: Instant::now(),
            processing_duration_ms: duration_ms,
        });
        if let Some(parent) = parent {
            lane.graph.insert_edge(&parent, &node);
        }
        lane.progress.record_visit(&node, path);

        Dispatch::Updated { agent, node }
    }

    fn apply_finish(
        &mut self,
        agent: AgentType,
        winner: bool,
        final_path: Option<Vec<String>>,
    ) -> Dispatch {
        if !winner {
            self.lane_mut(agent).progress.record_stopped();
            return Dispatch::Stopped { agent };
        }

        // The winner lock decides the race; the agent's terminal fields are
        // updated either way, a late winning finish is merely cosmetic.
        let first = self.session.declare_winner(agent);
        self.lane_mut(agent)
            .progress
            .record_win(final_path, Instant::now());
        Dispatch::Won { agent, first }
    }
}
