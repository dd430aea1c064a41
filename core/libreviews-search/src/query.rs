//! Request bodies for searching and autocompletion.
//!
//! Every multilingual field is indexed once per language
//! (`<field>.<lang>`) with a stemmed variant (`<field>.<lang>.processed`).
//! Queries target the requested language first and then its fallback chain.

use crate::config::THINGS_TYPE;
use libreviews_types::Language;
use serde_json::{Map, Value, json};

pub const HIGHLIGHT_PRE_TAG: &str = r#"<span class="search-highlight">"#;
pub const HIGHLIGHT_POST_TAG: &str = "</span>";

/// Multilingual fields searched on things.
pub const THING_SEARCH_FIELDS: &[&str] = &["label", "aliases", "description"];

/// Multilingual fields searched on reviews.
pub const REVIEW_SEARCH_FIELDS: &[&str] = &["title", "text"];

/// Multilingual fields offering completion suggestions.
pub const SUGGEST_FIELDS: &[&str] = &["label", "aliases"];

/// Fields and highlight settings for one search in one language.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// The requested language followed by its fallback chain.
    pub languages: Vec<Language>,
    /// Field names in priority order, requested language first.
    pub fields: Vec<String>,
    pub highlight_fields: Map<String, Value>,
}

impl SearchOptions {
    pub fn highlight(&self) -> Value {
        json!({
            "pre_tags": [HIGHLIGHT_PRE_TAG],
            "post_tags": [HIGHLIGHT_POST_TAG],
            "fields": self.highlight_fields,
        })
    }
}

/// Builds the language-ordered field list for `field_prefixes`.
pub fn get_search_options(field_prefixes: &[&str], lang: Language) -> SearchOptions {
    let languages = lang.fallback_chain();
    let mut fields = Vec::with_capacity(languages.len() * field_prefixes.len() * 2);
    let mut highlight_fields = Map::new();

    for language in &languages {
        for prefix in field_prefixes {
            let exact = format!("{prefix}.{}", language.code());
            let processed = format!("{exact}.processed");
            highlight_fields.insert(exact.clone(), json!({}));
            highlight_fields.insert(processed.clone(), json!({}));
            fields.push(exact);
            fields.push(processed);
        }
    }

    SearchOptions {
        languages,
        fields,
        highlight_fields,
    }
}

fn simple_query_string(query: &str, options: &SearchOptions) -> Value {
    json!({
        "simple_query_string": {
            "query": query,
            "fields": options.fields,
            "default_operator": "and",
        }
    })
}

/// Full-text search over things.
pub fn things_query(query: &str, lang: Language) -> Value {
    let options = get_search_options(THING_SEARCH_FIELDS, lang);
    json!({
        "query": simple_query_string(query, &options),
        "highlight": options.highlight(),
    })
}

/// Full-text search over reviews. The parent thing of every hit comes back
/// in its `inner_hits`.
pub fn reviews_query(query: &str, lang: Language) -> Value {
    let options = get_search_options(REVIEW_SEARCH_FIELDS, lang);
    json!({
        "query": {
            "bool": {
                "must": [simple_query_string(query, &options)],
                "should": [{
                    "has_parent": {
                        "parent_type": THINGS_TYPE,
                        "query": { "match_all": {} },
                        "inner_hits": {},
                    }
                }],
            }
        },
        "highlight": options.highlight(),
    })
}

/// One completion suggester of a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggester {
    /// Name of the suggester in request and response, e.g. `label-fr`.
    pub name: String,
    pub field: &'static str,
    pub language: Language,
}

/// The suggesters used for `lang`, in priority order.
pub fn thing_suggesters(lang: Language) -> Vec<Suggester> {
    lang.fallback_chain()
        .into_iter()
        .flat_map(|language| {
            SUGGEST_FIELDS.iter().map(move |&field| Suggester {
                name: format!("{field}-{}", language.code()),
                field,
                language,
            })
        })
        .collect()
}

/// Autocomplete request for thing labels and aliases starting with `prefix`.
pub fn suggest_thing_query(prefix: &str, lang: Language) -> Value {
    let mut suggest = Map::new();
    for suggester in thing_suggesters(lang) {
        suggest.insert(
            suggester.name.clone(),
            json!({
                "prefix": prefix,
                "completion": {
                    "field": format!("{}.{}.completion", suggester.field, suggester.language.code()),
                }
            }),
        );
    }
    json!({ "suggest": suggest })
}
