// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::tree::SyntaxError;

#[derive(Debug, Error)]
pub enum DocGenError {
    #[error("input unavailable: {source} (path: {path})")]
    InputUnavailable {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("parse failed with {} syntax error(s)", .0.len())]
    ParseFailure(Vec<SyntaxError>),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl DocGenError {
    /// Wraps an I/O error with the path it happened on.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocGenError>;

// Allow `?` on std::io::Error by converting to DocGenError::Io with unknown path.
impl From<std::io::Error> for DocGenError {
    fn from(source: std::io::Error) -> Self {
        DocGenError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

/// Per-item failure of the generation service. Never aborts a run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("empty response")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    GenerationFailure,
    TransportFailure,
}

impl GenerationError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::TransportFailure,
            Self::EmptyResponse | Self::MalformedResponse(_) | Self::Status(_) => {
                FailureKind::GenerationFailure
            }
        }
    }
}
