use crate::{ModelError, ModelResult, Permissions, Revision, Revisioned, User};
use chrono::{DateTime, Utc};
use libreviews_types::{Language, MlString, ReviewId, ThingId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_STAR_RATING: u8 = 1;
pub const MAX_STAR_RATING: u8 = 5;

/// A review of a [`Thing`](crate::Thing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub thing_id: ThingId,
    #[serde(default)]
    pub title: MlString,
    /// Markdown source.
    #[serde(default)]
    pub text: MlString,
    /// Rendered HTML of `text`.
    #[serde(default)]
    pub html: MlString,
    pub star_rating: u8,
    pub created_on: DateTime<Utc>,
    pub created_by: UserId,
    pub revision: Revision,
}

/// Editable content of a review in one language.
#[derive(Debug, Clone)]
pub struct ReviewContent<'a> {
    pub lang: Language,
    pub title: &'a str,
    pub text: &'a str,
    pub html: &'a str,
    pub star_rating: u8,
}

impl Review {
    pub fn new(creator: &User, thing_id: ThingId, content: ReviewContent<'_>) -> ModelResult<Self> {
        let mut review = Self {
            id: ReviewId::new(),
            thing_id,
            title: MlString::new(),
            text: MlString::new(),
            html: MlString::new(),
            star_rating: content.star_rating,
            created_on: Utc::now(),
            created_by: creator.id,
            revision: Revision::new(creator.id, &["create"]),
        };
        review.apply(content)?;
        Ok(review)
    }

    /// Replaces the content for `content.lang`; other languages are kept.
    pub fn apply(&mut self, content: ReviewContent<'_>) -> ModelResult<()> {
        validate_star_rating(content.star_rating)?;
        let title = content.title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        self.title.set(content.lang, title);
        self.text.set(content.lang, content.text);
        self.html.set(content.lang, content.html);
        self.star_rating = content.star_rating;
        Ok(())
    }

    pub fn validate(&self) -> ModelResult<()> {
        validate_star_rating(self.star_rating)?;
        if self.title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(())
    }

    pub fn permissions_for(&self, user: Option<&User>) -> Permissions {
        let Some(user) = user else {
            return Permissions::default();
        };
        let is_creator = user.id == self.created_by;
        Permissions {
            can_edit: user.is_super_user || is_creator,
            can_delete: user.is_super_user || user.is_site_moderator || is_creator,
            is_creator,
        }
    }
}

fn validate_star_rating(rating: u8) -> ModelResult<()> {
    if (MIN_STAR_RATING..=MAX_STAR_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ModelError::InvalidStarRating(rating))
    }
}

impl Revisioned for Review {
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
