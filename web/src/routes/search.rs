//! Full-text search and autocomplete.

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::i18n::{self, t};
use crate::render::{highlight, render_template};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use libreviews_search::{Hit, SearchResponse, THINGS_TYPE, ThingSuggestion};
use libreviews_types::{Language, MlString};
use maud::{Markup, html};
use serde::Deserialize;
use tracing::{debug, warn};

/// Highlight fragments shown per hit.
const MAX_FRAGMENTS: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// `GET /search?query=…`
pub async fn search_page(
    ctx: RequestContext,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let lang = ctx.language;
    let query = params.query.trim();
    if query.is_empty() {
        return render_template(&ctx, &t(lang, "search"), search_form(lang, "")).await;
    }

    let (things, reviews) = tokio::join!(
        state.search.search_things(query, lang),
        state.search.search_reviews(query, lang),
    );
    let title = i18n::translate(lang, "search results", &[query]);
    let body = match (things, reviews) {
        (Ok(things), Ok(reviews)) => {
            debug!(
                query,
                things = things.hits.total.value(),
                reviews = reviews.hits.total.value(),
                "Search completed"
            );
            results(lang, query, &title, &things, &reviews)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(query, error = %e, "Search failed");
            html! {
                (search_form(lang, query))
                p.search-unavailable { (t(lang, "search unavailable")) }
            }
        }
    };
    render_template(&ctx, &title, body).await
}

/// `GET /api/suggest/thing/{prefix}`
pub async fn suggest_thing(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Result<Json<Vec<ThingSuggestion>>, ApiError> {
    state
        .search
        .suggest_thing(&prefix, ctx.language)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(ctx.language, e))
}

fn search_form(lang: Language, query: &str) -> Markup {
    html! {
        form.search-page-form action="/search" method="get" {
            input type="search" name="query" value=(query) placeholder=(t(lang, "search placeholder"));
            button type="submit" { (t(lang, "search")) }
        }
    }
}

fn results(
    lang: Language,
    query: &str,
    title: &str,
    things: &SearchResponse,
    reviews: &SearchResponse,
) -> Markup {
    let no_results = things.hits.hits.is_empty() && reviews.hits.hits.is_empty();
    html! {
        (search_form(lang, query))
        h1 { (title) }
        @if no_results {
            p.no-results { (t(lang, "no search results")) }
        }
        @if !things.hits.hits.is_empty() {
            section.thing-results {
                h2 { (t(lang, "things")) }
                @for hit in &things.hits.hits {
                    (thing_result(hit, lang))
                }
            }
        }
        @if !reviews.hits.hits.is_empty() {
            section.review-results {
                h2 { (t(lang, "reviews")) }
                @for hit in &reviews.hits.hits {
                    (review_result(hit, lang))
                }
            }
        }
    }
}

fn hit_label(hit: &Hit, lang: Language) -> String {
    let label = hit
        .source_field::<MlString>("label")
        .and_then(|label| label.resolve(lang).map(|r| r.value.to_string()));
    label
        .or_else(|| {
            hit.source_field::<Vec<String>>("urls")
                .and_then(|urls| urls.into_iter().next())
        })
        .unwrap_or_else(|| hit.id.clone())
}

fn fragments<'a>(hit: &'a Hit, fields: &[&str]) -> Vec<&'a str> {
    fields
        .iter()
        .flat_map(|field| hit.highlights_for(field))
        .take(MAX_FRAGMENTS)
        .collect()
}

fn thing_result(hit: &Hit, lang: Language) -> Markup {
    html! {
        div.search-result.thing-result {
            a href=(format!("/thing/{}", hit.id)) { (hit_label(hit, lang)) }
            @for fragment in fragments(hit, &["label", "aliases", "description"]) {
                p.search-fragment { (highlight(fragment)) }
            }
        }
    }
}

fn review_result(hit: &Hit, lang: Language) -> Markup {
    let title = hit
        .source_field::<MlString>("title")
        .and_then(|title| title.resolve(lang).map(|r| r.value.to_string()));
    let thing_id = hit.source_field::<String>("thingId");
    let thing_label = hit.parent(THINGS_TYPE).map(|parent| hit_label(parent, lang));
    let rating = hit.source_field::<u8>("starRating");
    html! {
        div.search-result.review-result {
            @if let Some(title) = &title {
                h3 { (title) }
            }
            @if let (Some(thing_id), Some(label)) = (&thing_id, &thing_label) {
                p.review-subject {
                    a href=(format!("/thing/{thing_id}")) {
                        (i18n::translate(lang, "review of", &[label]))
                    }
                }
            }
            @if let Some(rating) = rating {
                p.star-rating data-rating=(rating) {
                    (i18n::translate(lang, "star rating", &[rating.to_string()]))
                }
            }
            @for fragment in fragments(hit, &["title", "text"]) {
                p.search-fragment { (highlight(fragment)) }
            }
        }
    }
}
