use thiserror::Error;

/// Unified error type for git-reckon operations
#[derive(Error, Debug)]
pub enum ReckonError {
    /// Invalid configuration or override (unknown stage, unknown scope, bad stage list)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Config file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-reckon
pub type Result<T> = std::result::Result<T, ReckonError>;

impl ReckonError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReckonError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReckonError::Version(msg.into())
    }

    /// Whether this is a configuration error, the only kind `resolve` produces
    pub fn is_config(&self) -> bool {
        matches!(self, ReckonError::Config(_))
    }
}
