//! Error type shared by configuration loading, expansion and interpretation.

use thiserror::Error;

/// Errors raised while building or rendering an L-System.
///
/// Every render error is fatal for that render: the surface keeps whatever
/// was drawn before the failure.
#[derive(Debug, Error)]
pub enum LSystemError {
    /// An action name outside `draw`, `move`, `left`, `right`, `push`, `pop`, `noop`.
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    /// A pop with no saved turtle state.
    #[error("Pop from an empty turtle stack")]
    EmptyStack,
    /// A configuration value that cannot be turned into a grammar or draw setting.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Malformed JSON configuration.
    #[error("Configuration parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LSystemError>;
