//! Domain records for lib.reviews.
//!
//! - [`Thing`]: a review subject with a multilingual label, aliases,
//!   description and URLs
//! - [`Review`]: a rated review of a thing
//! - [`User`]: a registered user with trust flags and UI preferences
//! - [`Revision`] / [`Revisioned`]: append-only revision metadata shared by
//!   editable records
//!
//! Records are plain data; persisting them is the job of
//! `libreviews-storage`, indexing them the job of `libreviews-search`.

mod review;
mod revision;
mod thing;
mod user;

pub use review::{MAX_STAR_RATING, MIN_STAR_RATING, Review, ReviewContent};
pub use revision::{Permissions, Revision, Revisioned};
pub use thing::{Thing, is_web_url};
pub use user::{User, UserPreference};

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Validation errors raised by domain records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("a thing needs at least one URL")]
    MissingUrl,

    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("star rating must be between 1 and 5, got {0}")]
    InvalidStarRating(u8),

    #[error("unknown preference: {0}")]
    UnknownPreference(String),
}
