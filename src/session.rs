//! Race session lifecycle and the winner lock.

use std::time::Instant;

use crate::protocol::AgentType;

/// Session lifecycle: `Idle -> Validating -> Running -> Finished/Stopped -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceState {
    Idle,
    Validating,
    Running,
    Finished,
    Stopped,
}

impl RaceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RaceState::Finished | RaceState::Stopped)
    }
}

/// Process-wide state for one race attempt.
///
/// `winner` is write-once: the first `declare_winner` call wins and every
/// later call is a no-op. This is the only shared-resource invariant the two
/// logically concurrent producers can violate, so it is guarded here and
/// nowhere else.
#[derive(Debug, Clone)]
pub struct RaceSession {
    state: RaceState,
    start_timestamp: Option<Instant>,
    winner: Option<AgentType>,
    start_topic: String,
    target_topic: String,
}

impl Default for RaceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceSession {
    pub fn new() -> Self {
        Self {
            state: RaceState::Idle,
            start_timestamp: None,
            winner: None,
            start_topic: String::new(),
            target_topic: String::new(),
        }
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn winner(&self) -> Option<AgentType> {
        self.winner
    }

    pub fn start_timestamp(&self) -> Option<Instant> {
        self.start_timestamp
    }

    pub fn start_topic(&self) -> &str {
        &self.start_topic
    }

    pub fn target_topic(&self) -> &str {
        &self.target_topic
    }

    /// Enter `Validating` while the backend round-trip is pending. Only legal
    /// from `Idle`; returns whether the transition happened.
    pub fn begin_validation(&mut self) -> bool {
        if self.state != RaceState::Idle {
            return false;
        }
        self.state = RaceState::Validating;
        true
    }

    /// Validation failed or was abandoned; nothing was seeded, so this only
    /// rewinds the state.
    pub fn abort_validation(&mut self) {
        if self.state == RaceState::Validating {
            self.state = RaceState::Idle;
        }
    }

    /// Validation succeeded: the race is on.
    pub fn start(&mut self, start_topic: &str, target_topic: &str, at: Instant) {
        self.state = RaceState::Running;
        self.start_timestamp = Some(at);
        self.winner = None;
        self.start_topic = start_topic.to_string();
        self.target_topic = target_topic.to_string();
    }

    /// Optimistic local cancellation; returns whether the session was
    /// actually running (the caller sends the stop command only then).
    pub fn stop(&mut self) -> bool {
        if self.state != RaceState::Running {
            return false;
        }
        self.state = RaceState::Stopped;
        true
    }

    /// Full reinitialization. Only legal from a terminal or idle state;
    /// returns whether the reset happened.
    pub fn reset(&mut self) -> bool {
        if !(self.state == RaceState::Idle || self.state.is_terminal()) {
            return false;
        }
        *self = Self::new();
        true
    }

    /// First-writer-wins winner declaration. Returns true only for the call
    /// that actually decided the race.
    pub fn declare_winner(&mut self, agent: AgentType) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(agent);
        self.state = RaceState::Finished;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_is_first_writer_wins() {
        let mut s = RaceSession::new();
        s.start("Mustard", "Chocolate", Instant::now());

        assert!(s.declare_winner(AgentType::Bfs));
        assert!(!s.declare_winner(AgentType::Dfs));
        assert_eq!(s.winner(), Some(AgentType::Bfs));
        assert_eq!(s.state(), RaceState::Finished);

        // Either arrival order: the first processed call decides.
        let mut s = RaceSession::new();
        s.start("Mustard", "Chocolate", Instant::now());
        assert!(s.declare_winner(AgentType::Dfs));
        assert!(!s.declare_winner(AgentType::Bfs));
        assert_eq!(s.winner(), Some(AgentType::Dfs));
    }

    #[test]
    fn stop_only_from_running() {
        let mut s = RaceSession::new();
        assert!(!s.stop());

        s.start("A", "B", Instant::now());
        assert!(s.stop());
        assert_eq!(s.state(), RaceState::Stopped);
        // Second stop is a no-op: exactly one stop command goes out.
        assert!(!s.stop());
    }

    #[test]
    fn reset_clears_winner_and_topics() {
        let mut s = RaceSession::new();
        s.start("A", "B", Instant::now());
        s.declare_winner(AgentType::Bfs);

        assert!(s.reset());
        assert_eq!(s.state(), RaceState::Idle);
        assert_eq!(s.winner(), None);
        assert!(s.start_topic().is_empty());
        assert!(s.start_timestamp().is_none());
    }

    #[test]
    fn reset_is_refused_mid_race() {
        let mut s = RaceSession::new();
        s.start("A", "B", Instant::now());
        assert!(!s.reset());
        assert_eq!(s.state(), RaceState::Running);
    }

    #[test]
    fn validation_round_trip_transitions() {
        let mut s = RaceSession::new();
        assert!(s.begin_validation());
        assert_eq!(s.state(), RaceState::Validating);
        // Not legal twice.
        assert!(!s.begin_validation());

        s.abort_validation();
        assert_eq!(s.state(), RaceState::Idle);
    }
}
