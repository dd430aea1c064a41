//! Document store seam for lib.reviews.
//!
//! The application talks to persistence only through the [`ThingStore`],
//! [`ReviewStore`] and [`UserStore`] traits. [`MemoryStore`] implements all
//! three in process and can be seeded from a JSON file.
//!
//! # Revisions
//!
//! Things and reviews are revisioned: saving a revision archives the current
//! one (marking it with `old_rev_of`) and installs the new one. Lookups only
//! ever return the current, non-deleted revision; anything else is
//! [`StorageError::NotFound`].

mod error;
mod memory;

pub use error::{StorageError, StorageResult};
pub use memory::{MemoryStore, SeedData};

use libreviews_model::{Review, Thing, User};
use libreviews_types::{ReviewId, ThingId, UserId};

/// Storage for review subjects.
pub trait ThingStore: Send + Sync {
    fn get_thing(&self, id: ThingId) -> StorageResult<Thing>;

    fn insert_thing(&self, thing: Thing) -> StorageResult<()>;

    /// Replaces the current revision of an existing thing.
    fn save_thing_revision(&self, thing: Thing) -> StorageResult<()>;

    /// Every stored revision of a thing, oldest first.
    fn thing_history(&self, id: ThingId) -> StorageResult<Vec<Thing>>;

    /// Current things, newest first.
    fn list_things(&self) -> StorageResult<Vec<Thing>>;
}

/// Storage for reviews.
pub trait ReviewStore: Send + Sync {
    fn get_review(&self, id: ReviewId) -> StorageResult<Review>;

    fn insert_review(&self, review: Review) -> StorageResult<()>;

    fn save_review_revision(&self, review: Review) -> StorageResult<()>;

    /// Current reviews of a thing, newest first.
    fn reviews_for_thing(&self, thing_id: ThingId) -> StorageResult<Vec<Review>>;
}

/// Storage for user accounts.
pub trait UserStore: Send + Sync {
    fn get_user(&self, id: UserId) -> StorageResult<User>;

    fn find_user_by_name(&self, name: &str) -> StorageResult<User>;

    /// Inserts or replaces a user. Login names are unique, ignoring case.
    fn save_user(&self, user: User) -> StorageResult<()>;
}

/// Everything the web layer needs from persistence.
pub trait Store: ThingStore + ReviewStore + UserStore {}

impl<T: ThingStore + ReviewStore + UserStore> Store for T {}
