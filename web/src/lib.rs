//! HTTP frontend for lib.reviews.
//!
//! Server-rendered pages for things and their reviews, label editing, search,
//! and the Ajax actions used by the browser-side editor.

pub mod config;
pub mod context;
pub mod error;
pub mod flash;
pub mod i18n;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{ApiError, AppError};
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the HTTP router with the given application state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/thing/{id}", get(routes::things::show_thing))
        .route(
            "/thing/{id}/edit/label",
            get(routes::things::edit_label_form).post(routes::things::save_label),
        )
        .route("/search", get(routes::search::search_page))
        .route("/api/suggest/thing/{prefix}", get(routes::search::suggest_thing))
        .route(
            "/api/actions/toggle-preference/",
            post(routes::actions::toggle_preference),
        )
        .route(
            "/api/actions/toggle-preference",
            post(routes::actions::toggle_preference),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
