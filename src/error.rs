use thiserror::Error;

/// User-facing failures on the race startup path.
///
/// Malformed inbound frames are deliberately not represented here: they are
/// dropped by the dispatcher and reported as a [`crate::Dispatch::Discarded`]
/// outcome, never surfaced as an error.
#[derive(Debug, Error)]
pub enum RaceError {
    /// Missing or malformed start/target input, or topic extraction failed.
    #[error("invalid input: {0}")]
    Input(String),

    /// The backend rejected the start/target pair.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No open connection, or the validation round-trip itself failed.
    #[error("connectivity: {0}")]
    Connectivity(String),
}
