//! Error types for journal persistence.

/// Errors that can occur while persisting journal state.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// A file could not be written.
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Aggregate state could not be serialized.
    #[error("journal serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
