mod common;

use common::spawn_app;
use libreviews_storage::UserStore;
use libreviews_web::context::REMOTE_USER_HEADER;
use libreviews_web::routes::actions::TogglePreferenceResponse;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const TOGGLE: &str = "/api/actions/toggle-preference/";

async fn toggle(app: &common::TestApp, user: Option<&str>, name: &str) -> reqwest::Response {
    let mut request = app
        .client
        .post(app.url(TOGGLE))
        .json(&json!({ "preferenceName": name }));
    if let Some(user) = user {
        request = request.header(REMOTE_USER_HEADER, user);
    }
    request.send().await.unwrap()
}

async fn front_page(app: &common::TestApp) -> String {
    app.client
        .get(app.url("/"))
        .header(REMOTE_USER_HEADER, "alice")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn toggle_flips_and_reports_new_value() {
    let app = spawn_app().await;
    let resp = toggle(&app, Some("alice"), "prefersRichTextEditor").await;
    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let body: TogglePreferenceResponse = resp.json().await.unwrap();
    assert_eq!(body.new_value, "true");
    let alice = app.store.find_user_by_name("alice").unwrap();
    assert!(alice.prefers_rich_text_editor);
}

#[tokio::test]
async fn toggling_twice_restores_original_state() {
    let app = spawn_app().await;
    let before = app.store.find_user_by_name("alice").unwrap().prefers_rich_text_editor;

    let first: Value = toggle(&app, Some("alice"), "prefersRichTextEditor")
        .await
        .json()
        .await
        .unwrap();
    let second: Value = toggle(&app, Some("alice"), "prefersRichTextEditor")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(first, json!({ "newValue": "true" }));
    assert_eq!(second, json!({ "newValue": "false" }));
    let after = app.store.find_user_by_name("alice").unwrap().prefers_rich_text_editor;
    assert_eq!(before, after);
}

#[tokio::test]
async fn toggle_without_trailing_slash() {
    let app = spawn_app().await;
    let resp = app
        .client
        .post(app.url("/api/actions/toggle-preference"))
        .header(REMOTE_USER_HEADER, "bob")
        .json(&json!({ "preferenceName": "showErrorDetails" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(app.store.find_user_by_name("bob").unwrap().show_error_details);
}

#[tokio::test]
async fn toggle_requires_signin() {
    let app = spawn_app().await;
    let resp = toggle(&app, None, "prefersRichTextEditor").await;
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errorKey"], "signin required");
    assert_eq!(body["message"], "You must be signed in to do that.");
}

#[tokio::test]
async fn unknown_preference_is_rejected() {
    let app = spawn_app().await;
    let resp = toggle(&app, Some("alice"), "likesPopups").await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errorKey"], "unknown preference");
    assert_eq!(body["message"], "Unknown preference: likesPopups.");

    let alice = app.store.find_user_by_name("alice").unwrap();
    assert!(!alice.prefers_rich_text_editor);
    assert!(!alice.show_error_details);
}

#[tokio::test]
async fn preference_reaches_page_config() {
    let app = spawn_app().await;
    assert!(front_page(&app).await.contains(r#""userPrefersRichTextEditor":false"#));
    toggle(&app, Some("alice"), "prefersRichTextEditor").await;
    assert!(front_page(&app).await.contains(r#""userPrefersRichTextEditor":true"#));
}

#[tokio::test]
async fn error_details_follow_preference() {
    let app = spawn_app().await;
    toggle(&app, Some("alice"), "showErrorDetails").await;
    let alice = app.store.find_user_by_name("alice").unwrap();
    assert!(alice.show_error_details);
    // Other preferences are untouched.
    assert!(!alice.prefers_rich_text_editor);
}
