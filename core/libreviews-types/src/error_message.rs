//! Localizable error messages.

use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

type Source = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// An error that can be shown to users in their own language.
///
/// Carries a message key for the message catalog, the string parameters to
/// substitute into the message, and optionally the underlying error that
/// caused it (logged, never shown).
#[derive(Clone)]
pub struct ErrorMessage {
    key: String,
    params: Vec<String>,
    source: Option<Source>,
}

impl ErrorMessage {
    /// Creates a message without parameters.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_params(key, Vec::new())
    }

    /// Creates a message with ordered parameters.
    pub fn with_params(key: impl Into<String>, params: Vec<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::InvalidMessageKey);
        }
        Ok(Self {
            key,
            params,
            source: None,
        })
    }

    /// Creates a message from untyped parameters (e.g. a JSON request body).
    ///
    /// `params` must be an array whose elements are all strings. Callers
    /// without parameters pass `[]` or use [`ErrorMessage::new`].
    pub fn from_json_params(key: impl Into<String>, params: &serde_json::Value) -> Result<Self> {
        let params = match params {
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        Error::InvalidMessageParams(format!("parameter {idx} is not a string"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(Error::InvalidMessageParams(format!(
                    "expected an array, got {other}"
                )));
            }
        };
        Self::with_params(key, params)
    }

    /// Attaches the underlying error for diagnostic logging.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw parameters.
    pub fn to_array(&self) -> &[String] {
        &self.params
    }

    /// The parameters, HTML-escaped for interpolation into markup.
    pub fn to_escaped_array(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|p| html_escape::encode_safe(p).into_owned())
            .collect()
    }

    /// The underlying error, if any.
    pub fn original_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorMessage")
            .field("key", &self.key)
            .field("params", &self.params)
            .field("source", &self.source.as_ref().map(|s| s.to_string()))
            .finish()
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} ({})", self.key, self.params.join(", "))
        }
    }
}

impl std::error::Error for ErrorMessage {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}
