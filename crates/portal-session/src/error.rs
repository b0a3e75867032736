//! Error types for credential storage

/// Failures writing or reading the durable credential store.
///
/// Missing or empty tokens are not errors; they are routed back to login by
/// the state machine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("credential storage quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
