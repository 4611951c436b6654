use std::io;
use thiserror::Error;

/// Custom error type for the terminal face
#[derive(Error, Debug)]
pub enum TermfaceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Location error: {0}")]
    Location(String),

    #[error("Battery error: {0}")]
    Battery(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the terminal face
pub type Result<T> = std::result::Result<T, TermfaceError>;

/// How the orchestrator reacts to a failed feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Permanent for the session; the field shows its placeholder.
    PermissionDenied,
    /// Keep the last known value and try again on the next tick.
    Transient,
    /// Unparseable payload; handled exactly like `Transient`.
    Malformed,
}

impl TermfaceError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Config(msg.into())
    }

    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        TermfaceError::PermissionDenied(msg.into())
    }

    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        TermfaceError::MalformedResponse(msg.into())
    }

    pub fn location<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Location(msg.into())
    }

    pub fn battery<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Battery(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Runtime(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Tui(msg.into())
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        TermfaceError::Other(msg.into())
    }

    /// Classify the error for the refresh loop.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TermfaceError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            TermfaceError::MalformedResponse(_) | TermfaceError::Json(_) => ErrorKind::Malformed,
            _ => ErrorKind::Transient,
        }
    }
}
