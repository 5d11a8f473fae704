//! Incrementally discovered hyperlink graph for one agent.

use std::collections::HashMap;
use std::time::Instant;

/// One discovered page.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub id: String,
    pub is_start: bool,
    pub is_target: bool,
    pub source_url: Option<String>,
    pub discovered_at: Instant,
    pub processing_duration_ms: Option<f64>,
}

/// Directed hyperlink between two pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Node/edge set discovered so far for one agent.
///
/// Node ids are unique; re-announcing an id is a no-op and the original
/// record keeps its metadata (first write wins). Edges are unique by
/// `(source, target)` and may reference nodes that have not materialized
/// yet. The renderer tolerates dangling endpoints.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    nodes: HashMap<String, NodeRecord>,
    edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize to the single start node of a new race.
    pub fn seed(&mut self, start_topic: &str, source_url: Option<String>) {
        self.clear();
        self.insert_node(NodeRecord {
            id: start_topic.to_string(),
            is_start: true,
            is_target: false,
            source_url,
            discovered_at: Instant::now(),
            processing_duration_ms: None,
        });
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Insert a node record; returns false (and changes nothing) when the id
    /// already exists.
    pub fn insert_node(&mut self, record: NodeRecord) -> bool {
        if self.nodes.contains_key(&record.id) {
            return false;
        }
        self.nodes.insert(record.id.clone(), record);
        true
    }

    /// Insert a directed edge; duplicate pairs are a no-op. Endpoints need
    /// not exist as node records yet.
    pub fn insert_edge(&mut self, source: &str, target: &str) -> bool {
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return false;
        }
        self.edges.push(GraphEdge {
            source: source.to_string(),
            target: target.to_string(),
        });
        true
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
