//! Documents submitted to the search index.

use chrono::{DateTime, Utc};
use libreviews_model::{Review, Thing};
use libreviews_types::{MlString, MlStringList, ThingId, UserId};
use serde::Serialize;
use std::sync::LazyLock;

static STRIPPER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::empty();
    builder.add_clean_content_tags(["script", "style"]);
    builder
});

/// Reduces an HTML fragment to its plain text.
pub fn strip_html(html: &str) -> String {
    let cleaned = STRIPPER.clean(html).to_string();
    html_escape::decode_html_entities(&cleaned).trim().to_string()
}

fn strip_ml(value: &MlString) -> MlString {
    value
        .iter()
        .map(|(lang, text)| (lang, strip_html(text)))
        .collect()
}

/// Indexed form of a [`Thing`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingDocument {
    pub created_on: DateTime<Utc>,
    pub created_by: UserId,
    pub urls: Vec<String>,
    pub label: MlString,
    pub aliases: MlStringList,
    pub description: MlString,
}

impl From<&Thing> for ThingDocument {
    fn from(thing: &Thing) -> Self {
        Self {
            created_on: thing.created_on,
            created_by: thing.created_by,
            urls: thing.urls.clone(),
            label: thing.label.clone(),
            aliases: thing.aliases.clone(),
            description: strip_ml(&thing.description),
        }
    }
}

/// Indexed form of a [`Review`]. Stored as a child of its thing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDocument {
    pub created_on: DateTime<Utc>,
    pub created_by: UserId,
    pub thing_id: ThingId,
    pub title: MlString,
    /// Plain text of the rendered review.
    pub text: MlString,
    pub star_rating: u8,
}

impl From<&Review> for ReviewDocument {
    fn from(review: &Review) -> Self {
        // Index the rendered HTML where there is one, the source otherwise.
        let mut text = review.text.clone();
        for (lang, html) in review.html.iter() {
            if !html.trim().is_empty() {
                text = text.with(lang, strip_html(html));
            }
        }
        Self {
            created_on: review.created_on,
            created_by: review.created_by,
            thing_id: review.thing_id,
            title: strip_ml(&review.title),
            text,
            star_rating: review.star_rating,
        }
    }
}
