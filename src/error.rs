//! Error types for the coin dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! None of these are fatal to a session: the controller turns them into
//! user notifications or falls back to empty state.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Why a replacement confirmation was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplacementError {
    #[error("Please select at least one coin to replace.")]
    NothingEvicted,

    #[error("Please select only one coin to replace.")]
    TooManyEvicted(usize),

    #[error("Coin {0} is not one of the current selections")]
    NotSelected(String),

    #[error("Coin {0} is already selected.")]
    AlreadySelected(String),
}

/// Coin dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status from a remote source
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// KV storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Replacement dialog input rejected
    #[error(transparent)]
    Validation(#[from] ReplacementError),

    /// Coin id not present in the catalog
    #[error("Unknown coin: {0}")]
    UnknownCoin(String),

    /// Confirm requested while no replacement dialog is open
    #[error("No replacement is pending")]
    NoPendingReplacement,

    /// API call without the client cookie issued by the dashboard page
    #[error("Missing client session. Please reload the page.")]
    MissingClient,

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl DashboardError {
    /// Whether the error comes from user input rather than a failing
    /// collaborator (network, storage, runtime).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Validation(_)
                | DashboardError::UnknownCoin(_)
                | DashboardError::NoPendingReplacement
                | DashboardError::MissingClient
        )
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<worker::kv::KvError> for DashboardError {
    fn from(err: worker::kv::KvError) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
