use thiserror::Error;

/// Main application error type that aggregates domain-specific errors
#[derive(Error, Debug)]
pub enum GorefError {
    /// Configuration layer errors
    #[error(transparent)]
    Config(#[from] crate::config::error::ConfigError),

    /// Parser layer errors
    #[error(transparent)]
    Parse(#[from] crate::parser::error::ParseError),

    /// `--inputCmd` value that names no known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// JSON encoding of the response envelope
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for goref operations
pub type Result<T> = std::result::Result<T, GorefError>;

// Helper methods for creating specific errors
impl GorefError {
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        GorefError::Parse(crate::parser::error::ParseError::LanguageSetupFailed(
            msg.into(),
        ))
    }
}
