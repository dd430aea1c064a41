//! Search client error types.

use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur when talking to the search service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns true if the service rejected an index creation because the
    /// index is already there.
    pub fn is_index_already_exists(&self) -> bool {
        match self {
            SearchError::Api { status, body } => {
                *status == 400
                    && (body.contains("resource_already_exists_exception")
                        || body.contains("index_already_exists_exception"))
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            SearchError::Api { status, .. } => *status == 404,
            SearchError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            _ => false,
        }
    }
}
