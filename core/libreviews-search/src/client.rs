//! HTTP client for the search service.

use crate::config::{REVIEWS_TYPE, SearchConfig, THINGS_TYPE};
use crate::document::{ReviewDocument, ThingDocument};
use crate::error::{SearchError, SearchResult};
use crate::mapping::index_body;
use crate::query::{reviews_query, suggest_thing_query, thing_suggesters, things_query};
use crate::response::{SearchResponse, ThingSuggestion};
use libreviews_model::{Review, Thing};
use libreviews_types::{Language, ThingId};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info};

/// Search-service client for things and reviews.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: SearchConfig,
    client: Client,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(SearchError::Config("search base URL is empty".into()));
        }
        if config.index.trim().is_empty() {
            return Err(SearchError::Config("search index name is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn index_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.index
        )
    }

    fn type_url(&self, doc_type: &str) -> String {
        format!("{}/{}", self.index_url(), doc_type)
    }

    async fn send(&self, request: RequestBuilder) -> SearchResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn search(&self, doc_type: &str, body: &Value) -> SearchResult<SearchResponse> {
        let url = format!("{}/_search", self.type_url(doc_type));
        let value = self.send(self.client.post(url).json(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Full-text search over things, matching `lang` and its fallbacks.
    pub async fn search_things(&self, query: &str, lang: Language) -> SearchResult<SearchResponse> {
        if query.trim().is_empty() {
            return Ok(SearchResponse::default());
        }
        self.search(THINGS_TYPE, &things_query(query, lang)).await
    }

    /// Full-text search over reviews; each hit carries its parent thing.
    pub async fn search_reviews(&self, query: &str, lang: Language) -> SearchResult<SearchResponse> {
        if query.trim().is_empty() {
            return Ok(SearchResponse::default());
        }
        self.search(REVIEWS_TYPE, &reviews_query(query, lang)).await
    }

    /// Autocomplete suggestions for thing labels and aliases. One entry per
    /// thing, taken from the highest-priority language that matched.
    pub async fn suggest_thing(
        &self,
        prefix: &str,
        lang: Language,
    ) -> SearchResult<Vec<ThingSuggestion>> {
        if prefix.trim().is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/_search", self.type_url(THINGS_TYPE));
        let response = self
            .send(self.client.post(url).json(&suggest_thing_query(prefix, lang)))
            .await?;

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for suggester in thing_suggesters(lang) {
            let entries = response
                .pointer(&format!("/suggest/{}", suggester.name))
                .and_then(Value::as_array);
            let options = entries
                .into_iter()
                .flatten()
                .filter_map(|entry| entry.get("options").and_then(Value::as_array))
                .flatten();
            for option in options {
                let (Some(id), Some(text)) = (
                    option.get("_id").and_then(Value::as_str),
                    option.get("text").and_then(Value::as_str),
                ) else {
                    continue;
                };
                if seen.insert(id.to_string()) {
                    suggestions.push(ThingSuggestion {
                        id: id.to_string(),
                        text: text.to_string(),
                        language: suggester.language.code().to_string(),
                        field: suggester.field.to_string(),
                    });
                }
            }
        }
        Ok(suggestions)
    }

    async fn put_document<T: Serialize>(
        &self,
        doc_type: &str,
        id: &str,
        parent: Option<&str>,
        document: &T,
    ) -> SearchResult<()> {
        let mut request = self
            .client
            .put(format!("{}/{}", self.type_url(doc_type), id))
            .json(document);
        if let Some(parent) = parent {
            request = request.query(&[("parent", parent)]);
        }
        self.send(request).await.map(|_| ())
    }

    async fn delete_document(&self, doc_type: &str, id: &str, parent: Option<&str>) -> SearchResult<()> {
        let mut request = self
            .client
            .request(Method::DELETE, format!("{}/{}", self.type_url(doc_type), id));
        if let Some(parent) = parent {
            request = request.query(&[("parent", parent)]);
        }
        match self.send(request).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other.map(|_| ()),
        }
    }

    /// Adds or replaces a thing in the index.
    ///
    /// Failures are logged and swallowed: the index may lag behind the store
    /// but the caller is never affected.
    pub async fn index_thing(&self, thing: &Thing) {
        let document = ThingDocument::from(thing);
        match self
            .put_document(THINGS_TYPE, &thing.id.to_string(), None, &document)
            .await
        {
            Ok(()) => debug!(thing_id = %thing.id, "Thing indexed"),
            Err(e) => error!(thing_id = %thing.id, error = %e, "Failed to index thing"),
        }
    }

    /// Adds or replaces a review as a child of its thing. Never fails; see
    /// [`SearchClient::index_thing`].
    pub async fn index_review(&self, review: &Review) {
        let document = ReviewDocument::from(review);
        let parent = review.thing_id.to_string();
        match self
            .put_document(REVIEWS_TYPE, &review.id.to_string(), Some(&parent), &document)
            .await
        {
            Ok(()) => debug!(review_id = %review.id, "Review indexed"),
            Err(e) => error!(review_id = %review.id, error = %e, "Failed to index review"),
        }
    }

    /// Removes a thing from the index. Never fails.
    pub async fn delete_thing(&self, id: ThingId) {
        if let Err(e) = self.delete_document(THINGS_TYPE, &id.to_string(), None).await {
            error!(thing_id = %id, error = %e, "Failed to remove thing from index");
        }
    }

    /// Removes a review from the index. Never fails.
    pub async fn delete_review(&self, review: &Review) {
        let parent = review.thing_id.to_string();
        if let Err(e) = self
            .delete_document(REVIEWS_TYPE, &review.id.to_string(), Some(&parent))
            .await
        {
            error!(review_id = %review.id, error = %e, "Failed to remove review from index");
        }
    }

    /// Creates the index with its mappings. An existing index is left alone.
    pub async fn create_indices(&self) -> SearchResult<()> {
        let request = self.client.put(self.index_url()).json(&index_body());
        match self.send(request).await {
            Ok(_) => {
                info!(index = %self.config.index, "Search index created");
                Ok(())
            }
            Err(e) if e.is_index_already_exists() => {
                info!(index = %self.config.index, "Search index already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
