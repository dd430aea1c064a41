//! Page layout and the shared error views.

use crate::context::RequestContext;
use crate::error::AppError;
use crate::flash::Flash;
use crate::i18n::{self, t};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use libreviews_search::query::{HIGHLIGHT_POST_TAG, HIGHLIGHT_PRE_TAG};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::{Map, Value, json};

/// Renders `body` inside the site layout with status 200.
pub async fn render_template(ctx: &RequestContext, title: &str, body: Markup) -> Response {
    render_page(ctx, StatusCode::OK, title, body).await
}

/// Renders `body` inside the site layout, consuming the viewer's pending
/// flash messages.
pub async fn render_page(
    ctx: &RequestContext,
    status: StatusCode,
    title: &str,
    body: Markup,
) -> Response {
    let flash = ctx.take_flash().await;
    let page = layout(ctx, title, &flash, body);
    (status, Html(page.into_string())).into_response()
}

fn layout(ctx: &RequestContext, title: &str, flash: &Flash, body: Markup) -> Markup {
    let lang = ctx.language;
    let site_name = t(lang, "site name");
    html! {
        (DOCTYPE)
        html lang=(lang.code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " \u{2013} " (site_name) }
                script { (PreEscaped(client_config_script(ctx))) }
            }
            body {
                header.site-header {
                    a.site-name href="/" { (site_name) }
                    form.search-form action="/search" method="get" {
                        input type="search" name="query" placeholder=(t(lang, "search placeholder"));
                        button type="submit" { (t(lang, "search")) }
                    }
                    span.user-status {
                        @match &ctx.user {
                            Some(user) => {
                                (i18n::translate(lang, "signed in as", &[&user.display_name]))
                            }
                            None => { (t(lang, "not signed in")) }
                        }
                    }
                }
                @if !flash.is_empty() {
                    @for message in &flash.page_messages {
                        div.site-message role="status" { (PreEscaped(i18n::translate_error(lang, message))) }
                    }
                    @for error in &flash.page_errors {
                        div.site-error role="alert" { (PreEscaped(i18n::translate_error(lang, error))) }
                    }
                }
                main { (body) }
            }
        }
    }
}

/// Browser-side configuration: the editor reads its default mode and its
/// strings from here.
pub fn client_config(ctx: &RequestContext) -> Value {
    let lang = ctx.language;
    let messages: Map<String, Value> = i18n::EDITOR_MESSAGES
        .iter()
        .map(|key| ((*key).to_string(), Value::String(t(lang, key))))
        .collect();
    json!({
        "language": lang.code(),
        "userName": ctx.user.as_ref().map(|u| u.name.as_str()),
        "userPrefersRichTextEditor": ctx.user.as_ref().is_some_and(|u| u.prefers_rich_text_editor),
        "isTrusted": ctx.user.as_ref().is_some_and(|u| u.is_trusted),
        "messages": messages,
    })
}

fn client_config_script(ctx: &RequestContext) -> String {
    // `</` would close the script element early.
    let config = client_config(ctx).to_string().replace("</", "<\\/");
    format!("window.config = {config};")
}

/// A search highlight fragment: text escaped, highlight markers kept.
pub fn highlight(fragment: &str) -> Markup {
    let escaped = html_escape::encode_text(fragment)
        .replace(&*html_escape::encode_text(HIGHLIGHT_PRE_TAG), HIGHLIGHT_PRE_TAG)
        .replace(&*html_escape::encode_text(HIGHLIGHT_POST_TAG), HIGHLIGHT_POST_TAG);
    PreEscaped(escaped)
}

pub async fn signin_required(ctx: &RequestContext) -> Response {
    message_page(ctx, StatusCode::UNAUTHORIZED, "signin required title", &AppError::SigninRequired).await
}

pub async fn permission_error(ctx: &RequestContext) -> Response {
    message_page(ctx, StatusCode::FORBIDDEN, "permission error title", &AppError::PermissionDenied).await
}

pub async fn resource_error(ctx: &RequestContext) -> Response {
    message_page(ctx, StatusCode::NOT_FOUND, "resource not found title", &AppError::NotFound).await
}

/// Generic failure page. Users who asked for error details get them.
pub async fn unknown_error(ctx: &RequestContext, error: &anyhow::Error) -> Response {
    let lang = ctx.language;
    let show_details = ctx.user.as_ref().is_some_and(|u| u.show_error_details);
    let body = html! {
        h1 { (t(lang, "unknown error title")) }
        p { (t(lang, "unknown error")) }
        @if show_details {
            details.error-details {
                summary { (t(lang, "error details")) }
                pre { (format!("{error:?}")) }
            }
        }
    };
    render_page(ctx, StatusCode::INTERNAL_SERVER_ERROR, &t(lang, "unknown error title"), body).await
}

async fn message_page(ctx: &RequestContext, status: StatusCode, title_key: &str, error: &AppError) -> Response {
    let lang = ctx.language;
    let title = t(lang, title_key);
    let body = html! {
        h1 { (title) }
        p.error-message { (PreEscaped(error.html(lang))) }
    };
    render_page(ctx, status, &title, body).await
}

/// Logs `error` as needed and renders the matching error view.
pub async fn error_view(ctx: &RequestContext, error: AppError) -> Response {
    error.log();
    match &error {
        AppError::SigninRequired => signin_required(ctx).await,
        AppError::PermissionDenied => permission_error(ctx).await,
        AppError::NotFound => resource_error(ctx).await,
        AppError::Message(_) => message_page(ctx, error.status(), "error title", &error).await,
        AppError::Unknown(e) => unknown_error(ctx, e).await,
    }
}

/// Turns a handler result into a response, rendering failures as pages.
pub async fn respond(ctx: &RequestContext, result: Result<Response, AppError>) -> Response {
    match result {
        Ok(response) => response,
        Err(error) => error_view(ctx, error).await,
    }
}
