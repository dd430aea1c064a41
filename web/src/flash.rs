//! One-shot page messages carried across a redirect.

use libreviews_types::{ErrorMessage, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Messages waiting to be shown to one user.
#[derive(Debug, Clone, Default)]
pub struct Flash {
    pub page_messages: Vec<ErrorMessage>,
    pub page_errors: Vec<ErrorMessage>,
}

impl Flash {
    pub fn is_empty(&self) -> bool {
        self.page_messages.is_empty() && self.page_errors.is_empty()
    }
}

/// Pending flash messages per signed-in user. The next page rendered for
/// that user takes them.
#[derive(Debug, Clone, Default)]
pub struct FlashStore {
    inner: Arc<Mutex<HashMap<UserId, Flash>>>,
}

impl FlashStore {
    pub async fn message(&self, user: UserId, message: ErrorMessage) {
        self.inner
            .lock()
            .await
            .entry(user)
            .or_default()
            .page_messages
            .push(message);
    }

    pub async fn error(&self, user: UserId, message: ErrorMessage) {
        self.inner
            .lock()
            .await
            .entry(user)
            .or_default()
            .page_errors
            .push(message);
    }

    /// Removes and returns everything pending for `user`.
    pub async fn take(&self, user: UserId) -> Flash {
        self.inner.lock().await.remove(&user).unwrap_or_default()
    }
}
