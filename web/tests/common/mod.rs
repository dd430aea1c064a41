#![allow(dead_code)]

use libreviews_model::{Thing, User};
use libreviews_search::{SearchClient, SearchConfig};
use libreviews_storage::{MemoryStore, Store, ThingStore, UserStore};
use libreviews_types::Language;
use libreviews_web::{AppState, build_router};
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub base: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
    pub thing: Thing,
    pub creator: User,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn thing_url(&self) -> String {
        self.url(&format!("/thing/{}", self.thing.id))
    }

    pub fn edit_label_url(&self) -> String {
        self.url(&format!("/thing/{}/edit/label", self.thing.id))
    }

    pub fn current_thing(&self) -> Thing {
        self.store.get_thing(self.thing.id).unwrap()
    }
}

pub fn lang(code: &str) -> Language {
    Language::parse(code).unwrap()
}

/// Search client for a service that is never reachable.
pub fn offline_search() -> SearchClient {
    SearchClient::new(SearchConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap()
}

/// A store with three users and one thing labelled in English and German.
///
/// alice created the thing, carol is trusted, bob has no special rights.
pub fn seeded_store() -> (Arc<MemoryStore>, Thing, User) {
    let store = Arc::new(MemoryStore::new());
    let alice = User::new("alice");
    let mut carol = User::new("carol");
    carol.is_trusted = true;
    store.save_user(alice.clone()).unwrap();
    store.save_user(User::new("bob")).unwrap();
    store.save_user(carol).unwrap();

    let mut thing = Thing::new(&alice, vec!["https://example.com/dune".into()]).unwrap();
    thing.set_label(lang("en"), "Dune").unwrap();
    thing.set_label(lang("de"), "Der Wüstenplanet").unwrap();
    store.insert_thing(thing.clone()).unwrap();
    (store, thing, alice)
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_app_with(search: SearchClient) -> TestApp {
    let (store, thing, creator) = seeded_store();
    let shared: Arc<dyn Store> = store.clone();
    let app = build_router(AppState::new(shared, search));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    TestApp {
        base: format!("http://127.0.0.1:{}", port),
        store,
        client,
        thing,
        creator,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(offline_search()).await
}

/// Waits for background work to reach the mock server.
pub async fn wait_for_requests(server: &wiremock::MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..50 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
