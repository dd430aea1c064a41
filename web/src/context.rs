//! Per-request viewer and language.

use crate::error::AppError;
use crate::flash::{Flash, FlashStore};
use crate::i18n;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::request::Parts;
use libreviews_model::User;
use libreviews_storage::{StorageError, Store};
use libreviews_types::{ErrorMessage, Language};
use tracing::info;

/// Header carrying the login name of the user the fronting proxy has
/// authenticated.
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Cookie holding an explicit interface language choice.
pub const LOCALE_COOKIE: &str = "locale";

/// Who is asking, and in which language to answer.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: Option<User>,
    pub language: Language,
    flash: FlashStore,
}

impl RequestContext {
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or(AppError::SigninRequired)
    }

    pub async fn flash_message(&self, message: ErrorMessage) {
        if let Some(user) = &self.user {
            self.flash.message(user.id, message).await;
        }
    }

    pub async fn flash_error(&self, message: ErrorMessage) {
        if let Some(user) = &self.user {
            self.flash.error(user.id, message).await;
        }
    }

    /// Takes this user's pending flash messages.
    pub async fn take_flash(&self) -> Flash {
        match &self.user {
            Some(user) => self.flash.take(user.id).await,
            None => Flash::default(),
        }
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = match remote_user(&parts.headers) {
            Some(name) => Some(resolve_user(state.store.as_ref(), name)?),
            None => None,
        };
        Ok(Self {
            user,
            language: request_language(&parts.headers),
            flash: state.flash.clone(),
        })
    }
}

fn remote_user(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REMOTE_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Looks up the account for an authenticated login name, creating it the
/// first time the name is seen.
fn resolve_user(store: &dyn Store, name: &str) -> Result<User, AppError> {
    match store.find_user_by_name(name) {
        Ok(user) => Ok(user),
        Err(StorageError::NotFound(_)) => {
            let user = User::new(name);
            match store.save_user(user.clone()) {
                Ok(()) => {
                    info!(user = %user.name, user_id = %user.id, "Registered new user");
                    Ok(user)
                }
                Err(StorageError::AlreadyExists(_)) => Ok(store.find_user_by_name(name)?),
                Err(e) => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// The `locale` cookie wins over `Accept-Language`; anything unsupported
/// falls through to the default language.
pub fn request_language(headers: &HeaderMap) -> Language {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_COOKIE)
        .and_then(|(_, value)| Language::parse(value));

    from_cookie
        .or_else(|| {
            headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(i18n::negotiate)
        })
        .unwrap_or_default()
}
