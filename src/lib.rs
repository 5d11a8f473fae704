//! Client-side reconciliation engine for the rabbit-hole arena: two search
//! strategies (breadth-first and depth-first) race across the Wikipedia
//! hyperlink graph toward a shared target, and this crate turns the backend's
//! progress stream into consistent client state:
//! - one incremental graph snapshot per agent,
//! - one bounded activity log plus scalar metrics per agent,
//! - a single race outcome, decided exactly once.
//!
//! The engine is synchronous and single-threaded by design: callers feed it
//! one inbound frame at a time (in transport order) via [`Arena::apply`], and
//! read store state back between frames. All IO lives in the `arena_cli`
//! member crate.

pub mod analytics;
pub mod dispatch;
pub mod error;
pub mod progress;
pub mod protocol;
pub mod session;
pub mod snapshot;
pub mod topic;

pub use dispatch::{AgentLane, Arena, Dispatch};
pub use error::RaceError;
pub use protocol::{AgentType, InboundMessage, StartCommand, STOP_COMMAND};
pub use session::{RaceSession, RaceState};
