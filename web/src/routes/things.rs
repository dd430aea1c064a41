//! Thing pages and label editing.

use crate::context::RequestContext;
use crate::error::AppError;
use crate::i18n::{self, t};
use crate::render::{render_template, respond};
use crate::state::AppState;
use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use libreviews_model::{ModelError, Review, Revisioned, Thing};
use libreviews_storage::StorageError;
use libreviews_types::{ErrorMessage, Language, ThingId};
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Body of the label edit form.
#[derive(Debug, Default, Deserialize)]
pub struct LabelForm {
    #[serde(rename = "thing-label", default)]
    pub label: String,
}

fn parse_thing_id(raw: &str) -> Result<ThingId, AppError> {
    ThingId::parse(raw).map_err(|_| AppError::NotFound)
}

fn load_thing(state: &AppState, raw_id: &str) -> Result<Thing, AppError> {
    let id = parse_thing_id(raw_id)?;
    Ok(state.store.get_thing(id)?)
}

/// `GET /thing/{id}`
pub async fn show_thing(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = thing_view(&ctx, &state, &id).await;
    respond(&ctx, result).await
}

async fn thing_view(ctx: &RequestContext, state: &AppState, id: &str) -> Result<Response, AppError> {
    let thing = load_thing(state, id)?;
    let reviews = state.store.reviews_for_thing(thing.id)?;
    let title = thing_title(&thing, ctx.language);
    let body = thing_page(ctx, &thing, &reviews);
    Ok(render_template(ctx, &title, body).await)
}

/// `GET /thing/{id}/edit/label`
pub async fn edit_label_form(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let result = label_form_view(&ctx, &state, &id).await;
    respond(&ctx, result).await
}

async fn label_form_view(ctx: &RequestContext, state: &AppState, id: &str) -> Result<Response, AppError> {
    let user = ctx.require_user()?;
    let thing = load_thing(state, id)?;
    if !thing.permissions_for(Some(user)).can_edit {
        return Err(AppError::PermissionDenied);
    }
    let lang = ctx.language;
    let title = i18n::translate(lang, "edit label of", &[thing_title(&thing, lang)]);
    let body = label_form(&thing, lang, &title);
    Ok(render_template(ctx, &title, body).await)
}

/// `POST /thing/{id}/edit/label`
pub async fn save_label(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<LabelForm>, FormRejection>,
) -> Response {
    // A missing or unreadable body is a blank submission.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(%rejection, "Label form without usable body");
            LabelForm::default()
        }
    };
    let result = update_label(&ctx, &state, &id, &form).await;
    respond(&ctx, result).await
}

/// Saves the label for the request language as a new revision. A blank
/// submission changes nothing and sends the user back to the form.
async fn update_label(
    ctx: &RequestContext,
    state: &AppState,
    id: &str,
    form: &LabelForm,
) -> Result<Response, AppError> {
    let user = ctx.require_user()?;
    let thing = load_thing(state, id)?;
    if !thing.permissions_for(Some(user)).can_edit {
        return Err(AppError::PermissionDenied);
    }

    let mut next = thing.new_revision(user, &["edit-label"]);
    match next.set_label(ctx.language, &form.label) {
        Ok(()) => {}
        Err(ModelError::EmptyLabel) => {
            ctx.flash_error(ErrorMessage::new("no empty label")?).await;
            return Ok(Redirect::to(&edit_label_path(thing.id)).into_response());
        }
        Err(e) => return Err(e.into()),
    }

    match state.store.save_thing_revision(next.clone()) {
        Ok(()) => {}
        Err(StorageError::Conflict(reason)) => {
            warn!(thing_id = %thing.id, user = %user.name, %reason, "Label edit lost a race");
            ctx.flash_error(ErrorMessage::new("edit conflict")?).await;
            return Ok(Redirect::to(&edit_label_path(thing.id)).into_response());
        }
        Err(e) => return Err(e.into()),
    }
    info!(
        thing_id = %next.id,
        user = %user.name,
        lang = %ctx.language,
        "Thing label updated"
    );
    ctx.flash_message(ErrorMessage::new("edit saved")?).await;

    let search = state.search.clone();
    let redirect = Redirect::to(&thing_path(next.id));
    tokio::spawn(async move { search.index_thing(&next).await });

    Ok(redirect.into_response())
}

pub fn thing_path(id: ThingId) -> String {
    format!("/thing/{id}")
}

pub fn edit_label_path(id: ThingId) -> String {
    format!("/thing/{id}/edit/label")
}

fn thing_title(thing: &Thing, lang: Language) -> String {
    thing.resolved_label(lang).unwrap_or_default().to_string()
}

fn thing_page(ctx: &RequestContext, thing: &Thing, reviews: &[Review]) -> Markup {
    let lang = ctx.language;
    // Marks a label shown in a fallback language.
    let label_lang = thing
        .label
        .resolve(lang)
        .map(|r| r.lang)
        .filter(|l| *l != lang.code());
    let can_edit = thing.permissions_for(ctx.user.as_ref()).can_edit;
    html! {
        article.thing data-thing-id=(thing.id.to_string()) {
            h1 {
                (thing_title(thing, lang))
                @if let Some(code) = label_lang {
                    " "
                    span.language-identifier { (code) }
                }
            }
            @if can_edit {
                a.edit-label href=(edit_label_path(thing.id)) { (t(lang, "edit label")) }
            }
            @if let Some(aliases) = thing.aliases.resolve(lang) {
                @if !aliases.value.is_empty() {
                    p.aliases {
                        (t(lang, "aliases")) ": " (aliases.value.join(", "))
                    }
                }
            }
            @if let Some(description) = thing.description.resolve(lang) {
                div.description lang=(description.lang) { (description.value) }
            }
            section.links {
                h2 { (t(lang, "links")) }
                ul {
                    @for url in &thing.urls {
                        li { a href=(url) rel="nofollow noopener" { (url) } }
                    }
                }
            }
            section.reviews {
                h2 { (t(lang, "reviews")) }
                @if reviews.is_empty() {
                    p.no-reviews { (t(lang, "no reviews")) }
                }
                @for review in reviews {
                    (review_card(review, lang))
                }
            }
        }
    }
}

fn review_card(review: &Review, lang: Language) -> Markup {
    let rating = review.star_rating.to_string();
    html! {
        div.review data-review-id=(review.id.to_string()) {
            @if let Some(title) = review.title.resolve(lang) {
                h3 lang=(title.lang) { (title.value) }
            }
            p.star-rating data-rating=(review.star_rating) {
                (i18n::translate(lang, "star rating", &[rating.as_str()]))
            }
            @if let Some(html) = review.html.resolve(lang) {
                div.review-text lang=(html.lang) { (PreEscaped(ammonia::clean(html.value))) }
            }
        }
    }
}

fn label_form(thing: &Thing, lang: Language, title: &str) -> Markup {
    let current = thing.label.get(lang.code()).unwrap_or_default();
    html! {
        h1 { (title) }
        form.edit-label-form method="post" action=(edit_label_path(thing.id)) {
            label for="thing-label" {
                (i18n::translate(lang, "label in", &[lang.native_name()]))
            }
            input id="thing-label" type="text" name="thing-label" value=(current) lang=(lang.code()) required;
            button type="submit" { (t(lang, "save")) }
        }
    }
}
