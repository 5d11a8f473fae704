//! Wire protocol for the backend connection.
//!
//! The backend pushes one JSON object per frame; the client sends plain-text
//! commands. Both racing agents are multiplexed onto the one channel and
//! disambiguated by the `agent_type` tag. Deserialization doubles as shape
//! validation: a frame missing a required field (`node`, `path`,
//! `agent_type`) fails to parse and is dropped by the dispatcher.

use serde::{Deserialize, Serialize};

/// Which of the two racing strategies a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Bfs,
    Dfs,
}

impl AgentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentType::Bfs => "bfs",
            AgentType::Dfs => "dfs",
        }
    }

    /// Display title used by the console view and the win summary.
    pub fn title(self) -> &'static str {
        match self {
            AgentType::Bfs => "The Explorer (BFS)",
            AgentType::Dfs => "The Deep Diver (DFS)",
        }
    }
}

/// One message pushed by the search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Bare acknowledgment that the backend accepted the start command.
    Start,
    Update {
        agent_type: AgentType,
        node: String,
        #[serde(default)]
        parent: Option<String>,
        path: Vec<String>,
        #[serde(default)]
        status: String,
        #[serde(default)]
        wikipedia_url: Option<String>,
        #[serde(default)]
        duration_ms: Option<f64>,
    },
    Finish {
        agent_type: AgentType,
        #[serde(default)]
        winner: bool,
        #[serde(default)]
        final_path: Option<Vec<String>>,
    },
}

/// Link-ranking models the backend knows how to drive, as offered by the
/// original model picker.
pub const KNOWN_MODELS: &[&str] = &[
    "openai/gpt-4o",
    "mistralai/mistral-large",
    "anthropic/claude-3.5-sonnet",
    "mistralai/mistral-7b-instruct",
    "nousresearch/hermes-2-pro-llama-3-8b",
];

pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Plain-text command that asks the backend to cancel the running race.
pub const STOP_COMMAND: &str = "stop";

/// Plain-text command that kicks off a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCommand {
    pub start_topic: String,
    pub target_topic: String,
    pub bfs_model: String,
    pub dfs_model: String,
}

impl StartCommand {
    /// Wire form: `start:<start>,target:<target>,bfs_model:<m>,dfs_model:<m>`.
    pub fn encode(&self) -> String {
        format!(
            "start:{},target:{},bfs_model:{},dfs_model:{}",
            self.start_topic, self.target_topic, self.bfs_model, self.dfs_model
        )
    }
}
