//! Core type definitions for lib.reviews.
//!
//! This crate defines the small, storage-agnostic types shared by every
//! other crate:
//! - Record identifiers (things, reviews, users, revisions)
//! - Supported display languages and their fallback chains
//! - Multilingual strings resolved through those chains
//! - Localizable error messages
//!
//! Domain records themselves live in `libreviews-model`.

mod error_message;
mod ids;
mod language;
mod multilingual;

pub use error_message::ErrorMessage;
pub use ids::{ReviewId, RevisionId, ThingId, UserId};
pub use language::{DEFAULT_LANGUAGE, Language, UNDETERMINED};
pub use multilingual::{MlString, MlStringList, Resolved};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("message key must be a non-empty string")]
    InvalidMessageKey,

    #[error("invalid message parameters: {0}")]
    InvalidMessageParams(String),
}
