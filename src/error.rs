//! Error type shared by the engine, the presenters and the route handlers.

use thiserror::Error;

/// Everything that can go wrong inside the engine.
///
/// Route handlers never propagate these to JavaScript as exceptions; they are
/// rendered as an error fragment instead (see `routes::util::error_fragment`).
#[derive(Debug, Error)]
pub enum NetRunnerError {
    /// The storage backend refused a read/write (quota, private mode, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid export data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A deferred signal was resolved a second time.
    #[error("Deferred signal already resolved")]
    AlreadyResolved,

    /// The resolving side was dropped before it produced a value.
    #[error("Prompt was abandoned before it completed")]
    Abandoned,

    #[error("A {0} prompt is already open")]
    PromptActive(&'static str),

    #[error("No {0} prompt is open")]
    NoActivePrompt(&'static str),

    #[error("A choice needs at least one option")]
    EmptyChoice,

    #[error("Choice index {index} out of range (0..{len})")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("Invalid character name: {0}")]
    InvalidName(String),

    #[error("Unknown reveal event: {0}")]
    UnknownEvent(String),

    #[error("Invalid argument for reveal event {event}: {reason}")]
    InvalidEventArgument { event: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NetRunnerError>;
