use thiserror::Error;

use crate::traits::SearchTicket;

/// Failures reported by a [`SearchProvider`](crate::SearchProvider).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search pattern is empty")]
    EmptyPattern,
    #[error("search request {0:?} was cancelled")]
    Cancelled(SearchTicket),
    #[error("search provider failed: {0}")]
    Provider(String),
}

/// Reasons an ex-command line could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExError {
    #[error("Not an editor command: {0}")]
    NotACommand(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Number required after =: {0}")]
    NumberRequired(String),
    #[error("{value} is invalid for {option}")]
    OutOfRange { option: &'static str, value: i64 },
    #[error("Argument required: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument for {command}: {argument}")]
    InvalidArgument {
        command: &'static str,
        argument: String,
    },
    #[error("Unterminated pattern in substitution")]
    UnterminatedPattern,
}

/// Errors loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors talking to the system clipboard.
#[cfg(feature = "clipboard")]
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}
