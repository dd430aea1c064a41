//! Typed views of search service responses.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: Option<u64>,
    #[serde(default)]
    pub hits: Hits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Total,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Hit count; older services send a number, newer ones an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Total {
    Count(u64),
    Object { value: u64 },
}

impl Total {
    pub fn value(&self) -> u64 {
        match self {
            Total::Count(n) | Total::Object { value: n } => *n,
        }
    }
}

impl Default for Total {
    fn default() -> Self {
        Total::Count(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
    /// Highlighted fragments per matched field.
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub inner_hits: HashMap<String, InnerHits>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InnerHits {
    pub hits: Hits,
}

impl Hit {
    /// Deserializes one field of the stored document.
    pub fn source_field<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.source
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Highlighted fragments for a field in any language, preferring the
    /// exact sub-field over the stemmed one.
    pub fn highlights_for(&self, field: &str) -> Vec<&str> {
        let prefix = format!("{field}.");
        let mut keys: Vec<&String> = self
            .highlight
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .collect();
        keys.sort_by(|a, b| {
            (a.ends_with(".processed"), a.as_str()).cmp(&(b.ends_with(".processed"), b.as_str()))
        });
        keys.into_iter()
            .flat_map(|k| self.highlight[k].iter().map(String::as_str))
            .collect()
    }

    /// The parent document delivered through `inner_hits`, if any.
    pub fn parent(&self, parent_type: &str) -> Option<&Hit> {
        self.inner_hits
            .get(parent_type)
            .and_then(|inner| inner.hits.hits.first())
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ThingSuggestion {
    pub id: String,
    pub text: String,
    /// Language of the matched label or alias.
    pub language: String,
    /// `label` or `aliases`.
    pub field: String,
}
