use thiserror::Error;

/// Top-level failure.  Only losing the terminal is fatal during play; the
/// other variants come from saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize snapshot: {0}")]
    Serialization(serde_json::Error),

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
}

/// A snapshot that cannot be turned into a complete game state.
#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot value out of range: {0}")]
    OutOfRange(String),
}
