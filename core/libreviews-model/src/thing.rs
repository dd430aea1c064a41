use crate::{ModelError, ModelResult, Permissions, Revision, Revisioned, User};
use chrono::{DateTime, Utc};
use libreviews_types::{Language, MlString, MlStringList, ThingId, UserId};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Whether `raw` is an absolute http or https URL with a host.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// A review subject, identified by one or more URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub id: ThingId,
    pub urls: Vec<String>,
    #[serde(default)]
    pub label: MlString,
    #[serde(default)]
    pub aliases: MlStringList,
    #[serde(default)]
    pub description: MlString,
    pub created_on: DateTime<Utc>,
    pub created_by: UserId,
    pub revision: Revision,
}

impl Thing {
    /// Creates the first revision of a thing. At least one URL is required,
    /// and every URL must be http or https.
    pub fn new(creator: &User, urls: Vec<String>) -> ModelResult<Self> {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        check_urls(&urls)?;
        Ok(Self {
            id: ThingId::new(),
            urls,
            label: MlString::new(),
            aliases: MlStringList::new(),
            description: MlString::new(),
            created_on: Utc::now(),
            created_by: creator.id,
            revision: Revision::new(creator.id, &["create"]),
        })
    }

    /// Checks records that did not come through [`Thing::new`], such as
    /// seed data.
    pub fn validate(&self) -> ModelResult<()> {
        check_urls(&self.urls)
    }

    /// Sets the label in one language. Blank input is rejected and the
    /// label, including its other translations, is left as it was.
    pub fn set_label(&mut self, lang: Language, text: &str) -> ModelResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        self.label.set(lang, text);
        Ok(())
    }

    /// The label to display in `lang`, falling back to the first URL.
    pub fn resolved_label(&self, lang: Language) -> Option<&str> {
        self.label
            .resolve(lang)
            .map(|r| r.value)
            .or_else(|| self.urls.first().map(String::as_str))
    }

    pub fn permissions_for(&self, user: Option<&User>) -> Permissions {
        let Some(user) = user else {
            return Permissions::default();
        };
        let is_creator = user.id == self.created_by;
        Permissions {
            can_edit: user.is_super_user || user.is_trusted || is_creator,
            can_delete: user.is_super_user || user.is_site_moderator,
            is_creator,
        }
    }
}

impl Revisioned for Thing {
    fn record_uuid(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn revision(&self) -> &Revision {
        &self.revision
    }

    fn revision_mut(&mut self) -> &mut Revision {
        &mut self.revision
    }
}

fn check_urls(urls: &[String]) -> ModelResult<()> {
    if urls.is_empty() {
        return Err(ModelError::MissingUrl);
    }
    match urls.iter().find(|u| !is_web_url(u)) {
        Some(bad) => Err(ModelError::InvalidUrl(bad.clone())),
        None => Ok(()),
    }
}
