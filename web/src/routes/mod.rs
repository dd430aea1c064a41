pub mod actions;
pub mod search;
pub mod things;

use crate::context::RequestContext;
use crate::i18n::t;
use crate::render::{render_template, respond};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Response;
use maud::html;

/// Things shown on the front page.
const RECENT_THINGS: usize = 20;

/// `GET /`: the most recently added things.
pub async fn home(ctx: RequestContext, State(state): State<AppState>) -> Response {
    let lang = ctx.language;
    let recent = match state.store.list_things() {
        Ok(recent) => recent,
        Err(e) => return respond(&ctx, Err(e.into())).await,
    };
    let body = html! {
        h1 { (t(lang, "things")) }
        ul.recent-things {
            @for thing in recent.iter().take(RECENT_THINGS) {
                li {
                    a href=(things::thing_path(thing.id)) {
                        (thing.resolved_label(lang).unwrap_or_default())
                    }
                }
            }
        }
    };
    render_template(&ctx, &t(lang, "site name"), body).await
}
