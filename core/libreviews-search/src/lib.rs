//! Search-service integration for lib.reviews.
//!
//! A request-shaping facade over an external full-text search service:
//! - [`query`]: search and autocomplete request bodies, ordered by the
//!   requested language's fallback chain
//! - [`document`]: the indexed form of things and reviews (HTML stripped)
//! - [`mapping`]: per-language sub-fields with stemming analyzers
//! - [`SearchClient`]: sends the above over HTTP
//!
//! Ranking, persistence and availability belong to the search service.
//! Index writes are fire-and-forget: failures are logged, never returned.

mod client;
mod config;
pub mod document;
mod error;
pub mod mapping;
pub mod query;
mod response;

pub use client::SearchClient;
pub use config::{DEFAULT_INDEX, REVIEWS_TYPE, SearchConfig, THINGS_TYPE};
pub use document::{ReviewDocument, ThingDocument, strip_html};
pub use error::{SearchError, SearchResult};
pub use query::{SearchOptions, get_search_options};
pub use response::{Hit, Hits, InnerHits, SearchResponse, ThingSuggestion, Total};
