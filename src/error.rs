use thiserror::Error;

use crate::api::Operation;
use crate::session::{BatchReport, SessionPhase};

#[derive(Error, Debug)]
pub enum ShoplistError {
    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{} of {} deletes failed", .report.failed.len(), .report.attempted())]
    PartialBatch { report: BatchReport },

    #[error("list is not ready (currently {0})")]
    NotReady(SessionPhase),

    #[error("item '{0}' not found in list")]
    ItemNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single round trip to the list service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response did not include the {0}")]
    MissingPayload(&'static str),
}

impl ShoplistError {
    pub fn transport(operation: Operation, source: impl Into<TransportError>) -> Self {
        ShoplistError::Transport {
            operation,
            source: source.into(),
        }
    }

    /// HTTP status of a failed round trip, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ShoplistError::Transport {
                source: TransportError::Status { status, .. },
                ..
            } => Some(*status),
            ShoplistError::Transport {
                source: TransportError::Http(e),
                ..
            } => e.status(),
            _ => None,
        }
    }

    /// The server rejected a duplicate list or item name.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::CONFLICT)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, ShoplistError>;
