use libreviews_model::{ModelError, Revisioned, Thing, User};
use libreviews_types::Language;

fn lang(code: &str) -> Language {
    Language::parse(code).unwrap()
}

fn make_thing(creator: &User) -> Thing {
    let mut thing = Thing::new(creator, vec!["https://example.com/book".into()]).unwrap();
    thing.set_label(lang("en"), "A Book").unwrap();
    thing.set_label(lang("de"), "Ein Buch").unwrap();
    thing
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_requires_a_url() {
    let user = User::new("alice");
    assert_eq!(Thing::new(&user, vec![]), Err(ModelError::MissingUrl));
    assert_eq!(Thing::new(&user, vec!["  ".into()]), Err(ModelError::MissingUrl));
}

#[test]
fn new_rejects_non_web_urls() {
    let user = User::new("alice");
    assert_eq!(
        Thing::new(&user, vec!["javascript:alert(1)".into()]),
        Err(ModelError::InvalidUrl("javascript:alert(1)".into()))
    );
    assert!(matches!(
        Thing::new(&user, vec!["https://example.com".into(), "example.com/bare".into()]),
        Err(ModelError::InvalidUrl(_))
    ));
    assert!(Thing::new(&user, vec!["http://example.com/a?b=c".into()]).is_ok());
}

#[test]
fn validate_catches_deserialized_urls() {
    let user = User::new("alice");
    let mut thing = Thing::new(&user, vec!["https://example.com".into()]).unwrap();
    assert_eq!(thing.validate(), Ok(()));
    thing.urls = vec!["data:text/html,<b>x</b>".into()];
    assert!(matches!(thing.validate(), Err(ModelError::InvalidUrl(_))));
}

#[test]
fn new_records_creator_and_first_revision() {
    let user = User::new("alice");
    let thing = Thing::new(&user, vec![" https://example.com ".into()]).unwrap();
    assert_eq!(thing.urls, vec!["https://example.com"]);
    assert_eq!(thing.created_by, user.id);
    assert_eq!(thing.revision.user, user.id);
    assert_eq!(thing.revision.tags, vec!["create"]);
    assert!(thing.is_current());
}

// ── Labels ───────────────────────────────────────────────────────

#[test]
fn set_label_keeps_other_languages() {
    let user = User::new("alice");
    let mut thing = make_thing(&user);
    thing.set_label(lang("en"), "  The Book ").unwrap();
    assert_eq!(thing.label.get("en"), Some("The Book"));
    assert_eq!(thing.label.get("de"), Some("Ein Buch"));
}

#[test]
fn empty_label_is_rejected_without_erasing_translations() {
    let user = User::new("alice");
    let mut thing = make_thing(&user);
    let before = thing.label.clone();

    assert_eq!(thing.set_label(lang("en"), ""), Err(ModelError::EmptyLabel));
    assert_eq!(thing.set_label(lang("fr"), "   "), Err(ModelError::EmptyLabel));
    assert_eq!(thing.label, before);
}

#[test]
fn resolved_label_follows_fallbacks_then_url() {
    let user = User::new("alice");
    let thing = make_thing(&user);
    assert_eq!(thing.resolved_label(lang("de")), Some("Ein Buch"));
    assert_eq!(thing.resolved_label(lang("fr")), Some("A Book"));

    let bare = Thing::new(&user, vec!["https://example.com/x".into()]).unwrap();
    assert_eq!(bare.resolved_label(lang("fr")), Some("https://example.com/x"));
}

// ── Permissions ──────────────────────────────────────────────────

#[test]
fn anonymous_users_have_no_permissions() {
    let thing = make_thing(&User::new("alice"));
    let perms = thing.permissions_for(None);
    assert!(!perms.can_edit && !perms.can_delete && !perms.is_creator);
}

#[test]
fn creator_can_edit_but_not_delete() {
    let alice = User::new("alice");
    let thing = make_thing(&alice);
    let perms = thing.permissions_for(Some(&alice));
    assert!(perms.can_edit);
    assert!(perms.is_creator);
    assert!(!perms.can_delete);
}

#[test]
fn other_users_need_trust_to_edit() {
    let thing = make_thing(&User::new("alice"));
    let mut bob = User::new("bob");
    assert!(!thing.permissions_for(Some(&bob)).can_edit);

    bob.is_trusted = true;
    assert!(thing.permissions_for(Some(&bob)).can_edit);
}

#[test]
fn moderators_and_super_users_can_delete() {
    let thing = make_thing(&User::new("alice"));
    let mut moderator = User::new("mod");
    moderator.is_site_moderator = true;
    assert!(thing.permissions_for(Some(&moderator)).can_delete);
    assert!(!thing.permissions_for(Some(&moderator)).can_edit);

    let mut root = User::new("root");
    root.is_super_user = true;
    let perms = thing.permissions_for(Some(&root));
    assert!(perms.can_edit && perms.can_delete);
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn serde_roundtrip_keeps_label_map() {
    let thing = make_thing(&User::new("alice"));
    let json = serde_json::to_value(&thing).unwrap();
    assert_eq!(json["label"]["de"], "Ein Buch");
    let parsed: Thing = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, thing);
}
