use serde::{Deserialize, Serialize};

/// Name of the single index holding things and reviews.
pub const DEFAULT_INDEX: &str = "libreviews";

/// Document type of review subjects (parents).
pub const THINGS_TYPE: &str = "things";

/// Document type of reviews (children of things).
pub const REVIEWS_TYPE: &str = "reviews";

/// Connection settings for the search service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search service (e.g. `http://localhost:9200`).
    pub base_url: String,
    pub index: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            index: DEFAULT_INDEX.to_string(),
            timeout_secs: 10,
        }
    }
}
