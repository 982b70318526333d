use thiserror::Error;

/// Result type for pyrepl-tools operations
pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Error, Debug)]
pub enum ToolError {
    /// Source text is not syntactically valid as a standalone module
    #[error("parse error: {0}")]
    Parse(String),

    /// Tree-sitter grammar could not be loaded
    #[error("grammar error: {0}")]
    Grammar(String),

    /// Malformed protocol frame or request envelope
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Interpreter session failed
    #[error("interpreter error: {0}")]
    Interpreter(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ToolError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn interpreter(msg: impl Into<String>) -> Self {
        Self::Interpreter(msg.into())
    }
}
