use chrono::{DateTime, Utc};
use libreviews_types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name, as forwarded by the authentication layer.
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub is_trusted: bool,
    #[serde(default)]
    pub is_super_user: bool,
    #[serde(default)]
    pub is_site_moderator: bool,
    #[serde(default)]
    pub prefers_rich_text_editor: bool,
    #[serde(default)]
    pub show_error_details: bool,
    pub registration_date: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: UserId::new(),
            display_name: name.clone(),
            name,
            is_trusted: false,
            is_super_user: false,
            is_site_moderator: false,
            prefers_rich_text_editor: false,
            show_error_details: false,
            registration_date: Utc::now(),
        }
    }

    pub fn preference(&self, pref: UserPreference) -> bool {
        match pref {
            UserPreference::PrefersRichTextEditor => self.prefers_rich_text_editor,
            UserPreference::ShowErrorDetails => self.show_error_details,
        }
    }

    pub fn set_preference(&mut self, pref: UserPreference, value: bool) {
        match pref {
            UserPreference::PrefersRichTextEditor => self.prefers_rich_text_editor = value,
            UserPreference::ShowErrorDetails => self.show_error_details = value,
        }
    }

    /// Flips a boolean preference and returns its new value.
    pub fn toggle_preference(&mut self, pref: UserPreference) -> bool {
        let value = !self.preference(pref);
        self.set_preference(pref, value);
        value
    }
}

/// Boolean preferences a user can toggle from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserPreference {
    /// Open text fields in rich-text mode instead of Markdown source mode.
    PrefersRichTextEditor,
    ShowErrorDetails,
}

impl UserPreference {
    pub const ALL: [UserPreference; 2] = [
        UserPreference::PrefersRichTextEditor,
        UserPreference::ShowErrorDetails,
    ];

    /// The name used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserPreference::PrefersRichTextEditor => "prefersRichTextEditor",
            UserPreference::ShowErrorDetails => "showErrorDetails",
        }
    }
}

impl fmt::Display for UserPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserPreference {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::ModelError::UnknownPreference(s.to_string()))
    }
}
