use std::fmt;
use thiserror::Error;

/// Top-level error type for dadabot.
#[derive(Debug, Error)]
pub enum BotError {
    /// A payload from the Bot API is missing a required field or has the wrong shape.
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayload),

    /// Transport-level failure talking to the Bot API.
    #[error("http error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What was wrong with a field during domain object construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadProblem {
    /// The field is absent (or `null`).
    Missing,
    /// The field is present but cannot be coerced to the expected type.
    WrongType { expected: &'static str },
    /// A sequence that must hold at least one element is empty.
    Empty,
}

impl fmt::Display for PayloadProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is missing"),
            Self::WrongType { expected } => write!(f, "is not {expected}"),
            Self::Empty => f.write_str("is empty"),
        }
    }
}

/// Structured construction failure for a Bot API entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {entity} payload: field `{field}` {problem}")]
pub struct MalformedPayload {
    pub entity: &'static str,
    pub field: &'static str,
    pub problem: PayloadProblem,
}

impl MalformedPayload {
    pub fn missing(entity: &'static str, field: &'static str) -> Self {
        Self {
            entity,
            field,
            problem: PayloadProblem::Missing,
        }
    }

    pub fn wrong_type(entity: &'static str, field: &'static str, expected: &'static str) -> Self {
        Self {
            entity,
            field,
            problem: PayloadProblem::WrongType { expected },
        }
    }

    pub fn empty(entity: &'static str, field: &'static str) -> Self {
        Self {
            entity,
            field,
            problem: PayloadProblem::Empty,
        }
    }
}
