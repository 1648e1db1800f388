//! Vote Sync Error Hierarchy
//!
//! Two layers of errors live here:
//! - [`Error`]: construction-time failures (configuration, target hydration, HTTP client setup).
//! - [`RemoteError`]: failures of a single remote vote call. These are terminal at the
//!   controller boundary and travel inside [`crate::SubmitOutcome::Failed`], so they are `Clone`.

use std::time::Duration;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading or parsing failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration values that parse but make no sense together
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Server-supplied card data names both a question and an answer, or neither
    #[error("Invalid vote target: question_id={question_id:?}, answer_id={answer_id:?}")]
    InvalidTarget {
        question_id: Option<u64>,
        answer_id: Option<u64>,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Http(String),
}

/// Classification of a failed remote vote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// No response within the allotted time
    #[error("Remote vote call timed out after {0:?}")]
    Timeout(Duration),

    /// Connection could not be established
    #[error("Vote service unreachable: {0}")]
    Unreachable(String),

    /// Credential missing, expired or refused by the server
    #[error("Vote service refused credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Server answered with a non-success status
    #[error("Vote service rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Anything else between us and the server (body encoding, redirects, protocol)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Short stable label, used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Timeout(_) => "timeout",
            RemoteError::Unreachable(_) => "unreachable",
            RemoteError::Unauthorized { .. } => "unauthorized",
            RemoteError::Rejected { .. } => "rejected",
            RemoteError::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            RemoteError::Unreachable(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}
