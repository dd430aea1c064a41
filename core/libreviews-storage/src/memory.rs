use crate::{ReviewStore, StorageError, StorageResult, ThingStore, UserStore};
use libreviews_model::{Review, Revisioned, Thing, User};
use libreviews_types::{ReviewId, ThingId, UserId};
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Contents of a seed file.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub things: Vec<Thing>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Current revisions plus the archived history of one record type.
struct RevisionTable<K, T> {
    current: HashMap<K, T>,
    history: HashMap<K, Vec<T>>,
}

impl<K, T> Default for RevisionTable<K, T> {
    fn default() -> Self {
        Self {
            current: HashMap::new(),
            history: HashMap::new(),
        }
    }
}

impl<K, T> RevisionTable<K, T>
where
    K: Copy + Eq + Hash + std::fmt::Display,
    T: Revisioned,
{
    fn get(&self, id: K) -> StorageResult<T> {
        self.current
            .get(&id)
            .filter(|r| r.is_current())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn insert(&mut self, id: K, record: T) -> StorageResult<()> {
        if self.current.contains_key(&id) || self.history.contains_key(&id) {
            return Err(StorageError::AlreadyExists(id.to_string()));
        }
        self.current.insert(id, record);
        Ok(())
    }

    /// Archives the current revision and installs `next` in its place.
    /// A deleting revision only goes to the history.
    fn save_revision(&mut self, id: K, next: T) -> StorageResult<()> {
        let current = self.get(id)?;
        let current_rev = current.revision().rev_id;
        if current_rev == next.revision().rev_id {
            return Err(StorageError::Conflict(format!(
                "{id} is already at revision {current_rev}"
            )));
        }
        if let Some(base) = next.revision().previous_rev_id
            && base != current_rev
        {
            return Err(StorageError::Conflict(format!(
                "{id} moved from revision {base} to {current_rev}"
            )));
        }

        let history = self.history.entry(id).or_default();
        history.push(current.archived());
        if next.revision().deleted {
            history.push(next.archived());
            self.current.remove(&id);
        } else {
            self.current.insert(id, next);
        }
        Ok(())
    }

    /// All revisions, oldest first, ending with the current one.
    fn history(&self, id: K) -> StorageResult<Vec<T>> {
        let mut revisions = self.history.get(&id).cloned().unwrap_or_default();
        if let Some(current) = self.current.get(&id) {
            revisions.push(current.clone());
        }
        if revisions.is_empty() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(revisions)
    }
}

/// A process-local store for things, reviews and users.
///
/// Lock guards are never held across an await point: every method takes the
/// lock, copies what it needs, and releases it before returning.
#[derive(Default)]
pub struct MemoryStore {
    things: RwLock<RevisionTable<ThingId, Thing>>,
    reviews: RwLock<RevisionTable<ReviewId, Review>>,
    users: RwLock<HashMap<UserId, User>>,
}

fn read<T>(lock: &RwLock<T>) -> StorageResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| StorageError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> StorageResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| StorageError::Poisoned)
}

fn check_thing(thing: &Thing) -> StorageResult<()> {
    thing
        .validate()
        .map_err(|e| StorageError::InvalidData(format!("thing {}: {e}", thing.id)))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store populated from a JSON seed file.
    pub fn open_seed(path: &Path) -> StorageResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        let store = Self::new();
        store.load(seed)?;
        info!(path = %path.display(), "Loaded seed data");
        Ok(store)
    }

    /// Inserts seed records. Reviews must refer to seeded or existing things.
    pub fn load(&self, seed: SeedData) -> StorageResult<()> {
        let (users, things, reviews) = (seed.users.len(), seed.things.len(), seed.reviews.len());
        for user in seed.users {
            self.save_user(user)?;
        }
        for thing in seed.things {
            self.insert_thing(thing)?;
        }
        for review in seed.reviews {
            self.insert_review(review)?;
        }
        debug!(users, things, reviews, "Seed records inserted");
        Ok(())
    }
}

impl ThingStore for MemoryStore {
    fn get_thing(&self, id: ThingId) -> StorageResult<Thing> {
        read(&self.things)?.get(id)
    }

    fn insert_thing(&self, thing: Thing) -> StorageResult<()> {
        check_thing(&thing)?;
        write(&self.things)?.insert(thing.id, thing)
    }

    fn save_thing_revision(&self, thing: Thing) -> StorageResult<()> {
        check_thing(&thing)?;
        write(&self.things)?.save_revision(thing.id, thing)
    }

    fn thing_history(&self, id: ThingId) -> StorageResult<Vec<Thing>> {
        read(&self.things)?.history(id)
    }

    fn list_things(&self) -> StorageResult<Vec<Thing>> {
        let table = read(&self.things)?;
        let mut things: Vec<Thing> = table
            .current
            .values()
            .filter(|t| t.is_current())
            .cloned()
            .collect();
        things.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(things)
    }
}

impl ReviewStore for MemoryStore {
    fn get_review(&self, id: ReviewId) -> StorageResult<Review> {
        read(&self.reviews)?.get(id)
    }

    fn insert_review(&self, review: Review) -> StorageResult<()> {
        review
            .validate()
            .map_err(|e| StorageError::InvalidData(format!("review {}: {e}", review.id)))?;
        self.get_thing(review.thing_id).map_err(|_| {
            StorageError::InvalidData(format!(
                "review {} refers to unknown thing {}",
                review.id, review.thing_id
            ))
        })?;
        write(&self.reviews)?.insert(review.id, review)
    }

    fn save_review_revision(&self, review: Review) -> StorageResult<()> {
        write(&self.reviews)?.save_revision(review.id, review)
    }

    fn reviews_for_thing(&self, thing_id: ThingId) -> StorageResult<Vec<Review>> {
        let table = read(&self.reviews)?;
        let mut reviews: Vec<Review> = table
            .current
            .values()
            .filter(|r| r.thing_id == thing_id && r.is_current())
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(reviews)
    }
}

impl UserStore for MemoryStore {
    fn get_user(&self, id: UserId) -> StorageResult<User> {
        read(&self.users)?
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn find_user_by_name(&self, name: &str) -> StorageResult<User> {
        read(&self.users)?
            .values()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("user {name}")))
    }

    fn save_user(&self, user: User) -> StorageResult<()> {
        let mut users = write(&self.users)?;
        let taken = users
            .values()
            .any(|u| u.id != user.id && u.name.eq_ignore_ascii_case(&user.name));
        if taken {
            return Err(StorageError::AlreadyExists(format!("user {}", user.name)));
        }
        users.insert(user.id, user);
        Ok(())
    }
}
