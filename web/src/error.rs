//! Request-level errors.

use crate::i18n;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use libreviews_model::ModelError;
use libreviews_search::SearchError;
use libreviews_storage::StorageError;
use libreviews_types::{ErrorMessage, Language};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("sign-in required")]
    SigninRequired,

    #[error("permission denied")]
    PermissionDenied,

    #[error("not found")]
    NotFound,

    /// A localizable problem with the request itself.
    #[error("{0}")]
    Message(ErrorMessage),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SigninRequired => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Message(_) => StatusCode::BAD_REQUEST,
            AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message key shown to the user.
    pub fn message_key(&self) -> &str {
        match self {
            AppError::SigninRequired => "signin required",
            AppError::PermissionDenied => "permission error",
            AppError::NotFound => "resource not found",
            AppError::Message(m) => m.key(),
            AppError::Unknown(_) => "unknown error",
        }
    }

    /// The user-facing text.
    pub fn text(&self, lang: Language) -> String {
        match self {
            AppError::Message(m) => i18n::translate(lang, m.key(), m.to_array()),
            other => i18n::t(lang, other.message_key()),
        }
    }

    /// The user-facing text, safe to embed in markup.
    pub fn html(&self, lang: Language) -> String {
        match self {
            AppError::Message(m) => i18n::translate_error(lang, m),
            other => html_escape::encode_text(&i18n::t(lang, other.message_key())).into_owned(),
        }
    }

    /// Sends details of unexpected failures to the log.
    pub fn log(&self) {
        match self {
            AppError::Unknown(e) => error!(error = ?e, "Unhandled error"),
            AppError::Message(m) => {
                if let Some(source) = m.original_error() {
                    error!(key = m.key(), error = %source, "Request failed");
                }
            }
            _ => {}
        }
    }

    fn message(key: &str, params: Vec<String>) -> Self {
        match ErrorMessage::with_params(key, params) {
            Ok(m) => AppError::Message(m),
            Err(e) => AppError::Unknown(e.into()),
        }
    }
}

impl From<ErrorMessage> for AppError {
    fn from(message: ErrorMessage) -> Self {
        AppError::Message(message)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(_) => AppError::NotFound,
            other => AppError::Unknown(other.into()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::EmptyLabel => AppError::message("no empty label", vec![]),
            ModelError::UnknownPreference(name) => AppError::message("unknown preference", vec![name]),
            other => AppError::message("invalid review", vec![other.to_string()]),
        }
    }
}

impl From<libreviews_types::Error> for AppError {
    fn from(e: libreviews_types::Error) -> Self {
        AppError::Unknown(e.into())
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Unknown(e.into())
    }
}

/// Rendering without request context: used for extractor rejections.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = self.text(Language::default_language());
        (status, body).into_response()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    message: String,
    error_key: &'a str,
}

/// JSON rendering of an [`AppError`] for API routes.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub lang: Language,
}

impl ApiError {
    pub fn new(lang: Language, error: impl Into<AppError>) -> Self {
        Self {
            error: error.into(),
            lang,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.log();
        let body = ErrorBody {
            message: self.error.text(self.lang),
            error_key: self.error.message_key(),
        };
        (self.error.status(), Json(body)).into_response()
    }
}
