use crate::User;
use chrono::{DateTime, Utc};
use libreviews_types::{RevisionId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata of one version of a revisioned record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub rev_id: RevisionId,
    /// Author of this revision.
    pub user: UserId,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deleted: bool,
    /// Revision this one was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_rev_id: Option<RevisionId>,
    /// Set on archived revisions: the id of the record they belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_rev_of: Option<Uuid>,
}

impl Revision {
    pub fn new(user: UserId, tags: &[&str]) -> Self {
        Self {
            rev_id: RevisionId::new(),
            user,
            date: Utc::now(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            deleted: false,
            previous_rev_id: None,
            old_rev_of: None,
        }
    }
}

/// A record whose edits are stored as an append-only list of revisions.
///
/// Editing never mutates a stored record: callers derive the next revision
/// with [`Revisioned::new_revision`], change it, and hand it to the store,
/// which archives the previous one.
pub trait Revisioned: Clone {
    /// Stable id of the record across all of its revisions.
    fn record_uuid(&self) -> Uuid;

    fn revision(&self) -> &Revision;

    fn revision_mut(&mut self) -> &mut Revision;

    /// A copy of this record carrying fresh revision metadata by `user`.
    fn new_revision(&self, user: &User, tags: &[&str]) -> Self {
        let mut next = self.clone();
        let mut revision = Revision::new(user.id, tags);
        revision.previous_rev_id = Some(self.revision().rev_id);
        *next.revision_mut() = revision;
        next
    }

    /// The next revision, marked as deleted.
    fn deletion(&self, user: &User) -> Self {
        let mut next = self.new_revision(user, &["delete"]);
        next.revision_mut().deleted = true;
        next
    }

    /// This revision as stored in the history once superseded.
    fn archived(&self) -> Self {
        let mut old = self.clone();
        old.revision_mut().old_rev_of = Some(self.record_uuid());
        old
    }

    /// Whether this is the live, non-deleted version of the record.
    fn is_current(&self) -> bool {
        let rev = self.revision();
        !rev.deleted && rev.old_rev_of.is_none()
    }
}

/// What a given viewer may do with a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub is_creator: bool,
}
