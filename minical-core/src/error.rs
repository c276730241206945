//! Error types for minical.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in minical operations.
#[derive(Error, Debug)]
pub enum CalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event id '{0}' matches more than one event")]
    AmbiguousEventId(String),

    #[error("An event with id {0} already exists")]
    DuplicateEventId(Uuid),
}

/// Result type alias for minical operations.
pub type CalResult<T> = Result<T, CalError>;
