// Domain-level errors for simulation workflows.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// Rejected before any state was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("pair not found")]
    NotFound,
}

// Failures of the durable pair store. Logged by callers, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("persistence backend failure: {0}")]
    Backend(String),
    #[error("persistence call timed out")]
    Timeout,
}
