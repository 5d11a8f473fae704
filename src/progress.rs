//! Per-agent progress: scalar metrics plus a bounded activity log.

use std::collections::VecDeque;
use std::time::Instant;

/// Most recent log lines kept per agent; older entries are evicted first.
pub const LOG_CAPACITY: usize = 8;

/// Mutable progress state for one racing agent.
///
/// The backend is authoritative on the current path: every update replaces
/// `path` wholesale, and `visited_count`/`depth` are rederived from it. The
/// client never reconstructs path history by appending.
#[derive(Debug, Clone)]
pub struct AgentProgress {
    pub model_id: String,
    pub visited_count: usize,
    pub depth: usize,
    pub path: Vec<String>,
    pub finish_timestamp: Option<Instant>,
    log: VecDeque<String>,
}

impl AgentProgress {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            visited_count: 0,
            depth: 0,
            path: Vec::new(),
            finish_timestamp: None,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Reinitialize for a new race starting at `start_topic`. The chosen
    /// model survives reseeding.
    pub fn seed(&mut self, start_topic: &str) {
        self.clear();
        self.set_path(vec![start_topic.to_string()]);
        self.push_log(format!("starting from: {start_topic}"));
    }

    /// Back to the empty state; the chosen model is kept.
    pub fn clear(&mut self) {
        self.set_path(Vec::new());
        self.finish_timestamp = None;
        self.log.clear();
    }

    fn set_path(&mut self, path: Vec<String>) {
        self.visited_count = path.len();
        self.depth = path.len().saturating_sub(1);
        self.path = path;
    }

    /// Apply one progress update: wholesale path replacement plus a log line.
    pub fn record_visit(&mut self, node: &str, path: Vec<String>) {
        self.set_path(path);
        self.push_log(format!("visiting: {node}"));
    }

    /// Terminal handling for a winning finish. `final_path`, when present,
    /// supersedes the current path.
    pub fn record_win(&mut self, final_path: Option<Vec<String>>, at: Instant) {
        if let Some(path) = final_path {
            self.set_path(path);
        }
        self.finish_timestamp = Some(at);
        self.push_log("target found".to_string());
        self.push_log("winner".to_string());
    }

    /// Terminal handling for a losing-agent notice; log only.
    pub fn record_stopped(&mut self) {
        self.push_log("race stopped".to_string());
    }

    pub fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_rederives_counters_from_path() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        p.record_visit(
            "Condiments",
            vec!["Mustard".to_string(), "Condiments".to_string()],
        );
        assert_eq!(p.visited_count, 2);
        assert_eq!(p.depth, 1);
        assert_eq!(p.log().last(), Some("visiting: Condiments"));
    }

    #[test]
    fn empty_path_keeps_counters_at_zero() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        p.record_visit("Mustard", Vec::new());
        assert_eq!(p.visited_count, 0);
        assert_eq!(p.depth, 0);
    }

    #[test]
    fn path_is_replaced_not_appended() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        p.record_visit("B", vec!["A".to_string(), "B".to_string()]);
        // Backend resends a corrected, shorter path; it wins outright.
        p.record_visit("C", vec!["A".to_string(), "C".to_string()]);
        assert_eq!(p.path, vec!["A".to_string(), "C".to_string()]);
        assert_eq!(p.visited_count, 2);
    }

    #[test]
    fn log_is_bounded_fifo() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        for i in 0..12 {
            p.push_log(format!("line {i}"));
        }
        assert_eq!(p.log_len(), LOG_CAPACITY);
        assert_eq!(p.log().next(), Some("line 4"));
        assert_eq!(p.log().last(), Some("line 11"));
    }

    #[test]
    fn win_falls_back_to_current_path() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        p.record_visit("B", vec!["A".to_string(), "B".to_string()]);
        p.record_win(None, Instant::now());
        assert_eq!(p.path, vec!["A".to_string(), "B".to_string()]);
        assert!(p.finish_timestamp.is_some());
        let tail: Vec<&str> = p.log().collect();
        assert!(tail.ends_with(&["target found", "winner"]));
    }

    #[test]
    fn win_adopts_final_path() {
        let mut p = AgentProgress::new("openai/gpt-4o");
        p.record_visit("B", vec!["A".to_string(), "B".to_string()]);
        p.record_win(
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]),
            Instant::now(),
        );
        assert_eq!(p.visited_count, 3);
        assert_eq!(p.depth, 2);
    }

    #[test]
    fn seed_preserves_model_and_starts_fresh() {
        let mut p = AgentProgress::new("mistralai/mistral-large");
        p.record_visit("B", vec!["A".to_string(), "B".to_string()]);
        p.seed("Mustard");
        assert_eq!(p.model_id, "mistralai/mistral-large");
        assert_eq!(p.path, vec!["Mustard".to_string()]);
        assert_eq!(p.visited_count, 1);
        assert_eq!(p.depth, 0);
        assert_eq!(p.log_len(), 1);
        assert!(p.finish_timestamp.is_none());
    }
}
