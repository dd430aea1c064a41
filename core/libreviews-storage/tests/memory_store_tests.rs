use libreviews_model::{Review, ReviewContent, Revisioned, Thing, User};
use libreviews_storage::{MemoryStore, ReviewStore, StorageError, ThingStore, UserStore};
use libreviews_types::{Language, ThingId};
use std::io::Write;

fn lang(code: &str) -> Language {
    Language::parse(code).unwrap()
}

fn make_thing(creator: &User) -> Thing {
    let mut thing = Thing::new(creator, vec!["https://example.com/film".into()]).unwrap();
    thing.set_label(lang("en"), "The Film").unwrap();
    thing.set_label(lang("fr"), "Le Film").unwrap();
    thing
}

fn make_review(author: &User, thing: &Thing) -> Review {
    Review::new(
        author,
        thing.id,
        ReviewContent {
            lang: lang("en"),
            title: "Worth it",
            text: "Yes.",
            html: "<p>Yes.</p>",
            star_rating: 5,
        },
    )
    .unwrap()
}

// ── Things ───────────────────────────────────────────────────────

#[test]
fn insert_and_get_thing() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    store.insert_thing(thing.clone()).unwrap();
    assert_eq!(store.get_thing(thing.id).unwrap(), thing);
}

#[test]
fn get_unknown_thing_is_not_found() {
    let store = MemoryStore::new();
    let err = store.get_thing(ThingId::new()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn duplicate_insert_is_rejected() {
    let store = MemoryStore::new();
    let thing = make_thing(&User::new("alice"));
    store.insert_thing(thing.clone()).unwrap();
    assert!(matches!(
        store.insert_thing(thing),
        Err(StorageError::AlreadyExists(_))
    ));
}

#[test]
fn saving_revision_archives_previous() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    store.insert_thing(thing.clone()).unwrap();

    let mut next = thing.new_revision(&alice, &["edit-label"]);
    next.set_label(lang("en"), "The Movie").unwrap();
    store.save_thing_revision(next.clone()).unwrap();

    let current = store.get_thing(thing.id).unwrap();
    assert_eq!(current.label.get("en"), Some("The Movie"));
    assert_eq!(current.label.get("fr"), Some("Le Film"));

    let history = store.thing_history(thing.id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].revision.rev_id, thing.revision.rev_id);
    assert_eq!(history[0].revision.old_rev_of, Some(thing.id.as_uuid()));
    assert_eq!(history[1].revision.rev_id, next.revision.rev_id);
}

#[test]
fn saving_same_revision_twice_conflicts() {
    let store = MemoryStore::new();
    let thing = make_thing(&User::new("alice"));
    store.insert_thing(thing.clone()).unwrap();
    assert!(matches!(
        store.save_thing_revision(thing),
        Err(StorageError::Conflict(_))
    ));
}

#[test]
fn edits_from_a_stale_revision_conflict() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    store.insert_thing(thing.clone()).unwrap();

    let mut first = thing.new_revision(&alice, &["edit-label"]);
    first.set_label(lang("de"), "Der Film").unwrap();
    let mut second = thing.new_revision(&alice, &["edit-label"]);
    second.set_label(lang("es"), "La Película").unwrap();

    store.save_thing_revision(first).unwrap();
    assert!(matches!(
        store.save_thing_revision(second),
        Err(StorageError::Conflict(_))
    ));

    let current = store.get_thing(thing.id).unwrap();
    assert_eq!(current.label.get("de"), Some("Der Film"));
    assert_eq!(current.label.get("es"), None);
    assert_eq!(store.thing_history(thing.id).unwrap().len(), 2);
}

#[test]
fn edits_chain_from_the_current_revision() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    store.insert_thing(thing.clone()).unwrap();

    let first = thing.new_revision(&alice, &["edit-label"]);
    store.save_thing_revision(first).unwrap();
    let second = store.get_thing(thing.id).unwrap().new_revision(&alice, &["edit-label"]);
    store.save_thing_revision(second).unwrap();
    assert_eq!(store.thing_history(thing.id).unwrap().len(), 3);
}

#[test]
fn things_with_unsafe_urls_are_refused() {
    let store = MemoryStore::new();
    let mut thing = make_thing(&User::new("alice"));
    thing.urls = vec!["javascript:alert(1)".into()];
    assert!(matches!(
        store.insert_thing(thing),
        Err(StorageError::InvalidData(_))
    ));
}

#[test]
fn saving_revision_of_unknown_thing_fails() {
    let store = MemoryStore::new();
    let thing = make_thing(&User::new("alice"));
    assert!(store.save_thing_revision(thing).unwrap_err().is_not_found());
}

#[test]
fn deleted_thing_is_not_found_but_keeps_history() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    store.insert_thing(thing.clone()).unwrap();

    store.save_thing_revision(thing.deletion(&alice)).unwrap();

    assert!(store.get_thing(thing.id).unwrap_err().is_not_found());
    let history = store.thing_history(thing.id).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[1].revision.deleted);
    assert!(store.list_things().unwrap().is_empty());
}

#[test]
fn list_things_returns_current_revisions() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    store.insert_thing(make_thing(&alice)).unwrap();
    store.insert_thing(make_thing(&alice)).unwrap();
    assert_eq!(store.list_things().unwrap().len(), 2);
}

// ── Reviews ──────────────────────────────────────────────────────

#[test]
fn reviews_are_listed_per_thing() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let film = make_thing(&alice);
    let other = make_thing(&alice);
    store.insert_thing(film.clone()).unwrap();
    store.insert_thing(other.clone()).unwrap();

    let review = make_review(&alice, &film);
    store.insert_review(review.clone()).unwrap();
    store.insert_review(make_review(&alice, &other)).unwrap();

    let reviews = store.reviews_for_thing(film.id).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, review.id);
    assert_eq!(store.get_review(review.id).unwrap(), review);
}

#[test]
fn review_of_unknown_thing_is_rejected() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let review = make_review(&alice, &make_thing(&alice));
    assert!(matches!(
        store.insert_review(review),
        Err(StorageError::InvalidData(_))
    ));
}

#[test]
fn review_revision_replaces_current() {
    let store = MemoryStore::new();
    let alice = User::new("alice");
    let film = make_thing(&alice);
    store.insert_thing(film.clone()).unwrap();
    let review = make_review(&alice, &film);
    store.insert_review(review.clone()).unwrap();

    let mut next = review.new_revision(&alice, &["edit"]);
    next.star_rating = 3;
    store.save_review_revision(next).unwrap();
    assert_eq!(store.get_review(review.id).unwrap().star_rating, 3);
}

// ── Users ────────────────────────────────────────────────────────

#[test]
fn users_are_found_by_name_ignoring_case() {
    let store = MemoryStore::new();
    let alice = User::new("Alice");
    store.save_user(alice.clone()).unwrap();
    assert_eq!(store.find_user_by_name("alice").unwrap().id, alice.id);
    assert_eq!(store.get_user(alice.id).unwrap(), alice);
    assert!(store.find_user_by_name("bob").unwrap_err().is_not_found());
}

#[test]
fn saving_user_updates_in_place() {
    let store = MemoryStore::new();
    let mut alice = User::new("alice");
    store.save_user(alice.clone()).unwrap();
    alice.prefers_rich_text_editor = true;
    store.save_user(alice.clone()).unwrap();
    assert!(store.get_user(alice.id).unwrap().prefers_rich_text_editor);
}

#[test]
fn login_names_are_unique() {
    let store = MemoryStore::new();
    store.save_user(User::new("alice")).unwrap();
    assert!(matches!(
        store.save_user(User::new("ALICE")),
        Err(StorageError::AlreadyExists(_))
    ));
}

// ── Seeding ──────────────────────────────────────────────────────

#[test]
fn open_seed_loads_all_records() {
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    let review = make_review(&alice, &thing);
    let seed = serde_json::json!({
        "users": [alice],
        "things": [thing],
        "reviews": [review],
    });

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(seed.to_string().as_bytes()).unwrap();

    let store = MemoryStore::open_seed(file.path()).unwrap();
    assert_eq!(store.get_thing(thing.id).unwrap().label.get("fr"), Some("Le Film"));
    assert_eq!(store.reviews_for_thing(thing.id).unwrap().len(), 1);
    assert_eq!(store.find_user_by_name("alice").unwrap().id, alice.id);
}

#[test]
fn open_seed_reports_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    assert!(matches!(
        MemoryStore::open_seed(file.path()),
        Err(StorageError::Serialization(_))
    ));
}

#[test]
fn open_seed_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        MemoryStore::open_seed(&dir.path().join("missing.json")),
        Err(StorageError::Io(_))
    ));
}
