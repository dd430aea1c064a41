//! Index settings and mappings.

use crate::config::{REVIEWS_TYPE, THINGS_TYPE};
use libreviews_types::Language;
use serde_json::{Map, Value, json};

/// Analyzer for languages the search service has no stemmer for.
const FALLBACK_ANALYZER: &str = "standard";

/// A multilingual text property: one sub-field per supported language, each
/// with a stemmed `processed` variant and optionally a `completion` variant.
pub fn multilingual_text_property(with_completion: bool) -> Value {
    let mut properties = Map::new();
    for language in Language::all() {
        let mut fields = Map::new();
        fields.insert(
            "processed".into(),
            json!({
                "type": "text",
                "analyzer": language.analyzer().unwrap_or(FALLBACK_ANALYZER),
            }),
        );
        if with_completion {
            fields.insert("completion".into(), json!({ "type": "completion" }));
        }
        properties.insert(
            language.code().to_string(),
            json!({ "type": "text", "fields": fields }),
        );
    }
    json!({ "properties": properties })
}

/// Request body creating the index with mappings for both document types.
pub fn index_body() -> Value {
    let mut mappings = Map::new();
    mappings.insert(
        THINGS_TYPE.into(),
        json!({
            "properties": {
                "createdOn": { "type": "date" },
                "createdBy": { "type": "keyword" },
                "urls": { "type": "keyword" },
                "label": multilingual_text_property(true),
                "aliases": multilingual_text_property(true),
                "description": multilingual_text_property(false),
            }
        }),
    );
    mappings.insert(
        REVIEWS_TYPE.into(),
        json!({
            "_parent": { "type": THINGS_TYPE },
            "properties": {
                "createdOn": { "type": "date" },
                "createdBy": { "type": "keyword" },
                "thingId": { "type": "keyword" },
                "title": multilingual_text_property(false),
                "text": multilingual_text_property(false),
                "starRating": { "type": "integer" },
            }
        }),
    );
    json!({ "mappings": mappings })
}
