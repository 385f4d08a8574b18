//! End-to-end tests: the store client against a live router on a loopback port.

use canvas::coords::Point;
use canvas::engine::EngineCore;
use canvas::scene::{self, Scene};
use canvas::shape::{ShapeKind, instantiate};
use store::{HttpStore, PaintingSession, PaintingStore, StoreConfig, StoreError};
use uuid::Uuid;

use super::*;

async fn spawn_server() -> HttpStore {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(AppState::new())).await.unwrap();
    });
    let config = StoreConfig::default().with_base_url(&format!("http://{addr}"));
    HttpStore::new(&config).unwrap()
}

fn scene(name: &str) -> Scene {
    Scene {
        name: name.to_owned(),
        shapes: vec![
            instantiate(ShapeKind::Square, Point::new(0.0, 0.0)),
            instantiate(ShapeKind::Circle, Point::new(120.5, 40.25)),
        ],
    }
}

#[tokio::test]
async fn healthz_is_ok() {
    let store = spawn_server().await;
    let url = store.base_url().join("/healthz").unwrap();
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    store.health().await.unwrap();
}

#[tokio::test]
async fn missing_username_query_is_bad_request() {
    let store = spawn_server().await;
    let url = store.base_url().join("/api/paintings").unwrap();
    let response = reqwest::get(url).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_check_and_create() {
    let store = spawn_server().await;
    assert!(!store.check_user_exists("ada").await.unwrap());
    store.create_user("ada").await.unwrap();
    assert!(store.check_user_exists("ada").await.unwrap());

    let err = store.create_user("ada").await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn blank_username_is_rejected() {
    let store = spawn_server().await;
    let err = store.create_user("   ").await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 400, .. }));
}

#[tokio::test]
async fn username_with_spaces_round_trips_through_path() {
    let store = spawn_server().await;
    store.create_user("ada lovelace").await.unwrap();
    assert!(store.check_user_exists("ada lovelace").await.unwrap());
    assert!(!store.check_user_exists("ada").await.unwrap());
}

#[tokio::test]
async fn padded_username_matches_trimmed_registration() {
    let store = spawn_server().await;
    store.create_user(" ada").await.unwrap();
    assert!(store.check_user_exists(" ada").await.unwrap());
    assert!(store.check_user_exists("ada").await.unwrap());

    let doc = scene::to_document(&scene("Dock")).unwrap();
    let id = store.create_painting(" ada ", &doc).await.unwrap();
    assert_eq!(store.list_paintings("ada").await.unwrap()[0].id, id);
    store.get_painting("ada\t", id).await.unwrap();
}

#[tokio::test]
async fn create_list_get_update_painting() {
    let store = spawn_server().await;
    store.create_user("ada").await.unwrap();

    let original = scene("Harbor");
    let doc = scene::to_document(&original).unwrap();
    let id = store.create_painting("ada", &doc).await.unwrap();

    let list = store.list_paintings("ada").await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].name, "Harbor");

    let fetched = store.get_painting("ada", id).await.unwrap();
    assert_eq!(fetched.shapes, original.shapes);
    assert_eq!(fetched.format_version.as_deref(), Some("1.0"));

    let mut renamed = scene("Harbor at night");
    renamed.shapes.truncate(1);
    store.update_painting("ada", id, &scene::to_document(&renamed).unwrap()).await.unwrap();

    let fetched = store.get_painting("ada", id).await.unwrap();
    assert_eq!(fetched.shapes.len(), 1);
    assert_eq!(store.list_paintings("ada").await.unwrap()[0].name, "Harbor at night");
}

#[tokio::test]
async fn missing_resources_map_to_not_found() {
    let store = spawn_server().await;
    assert!(store.list_paintings("ghost").await.unwrap_err().is_not_found());

    store.create_user("ada").await.unwrap();
    assert!(store.get_painting("ada", Uuid::new_v4()).await.unwrap_err().is_not_found());

    let doc = scene::to_document(&scene("x")).unwrap();
    assert!(store.update_painting("ada", Uuid::new_v4(), &doc).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn session_save_then_load_into_engine() {
    let store = spawn_server().await;
    let mut session = PaintingSession::login(store, "ada").await.unwrap();

    let mut engine = EngineCore::new();
    engine.set_name("Still life");
    engine.load_document(scene::to_document(&scene("Still life")).unwrap()).unwrap();

    let id = session.save(&engine.scene()).await.unwrap();
    let again = session.save(&engine.scene()).await.unwrap();
    assert_eq!(id, again);
    assert_eq!(session.list().await.unwrap().len(), 1);

    let mut other = EngineCore::new();
    let doc = session.load(id).await.unwrap();
    other.load_document(doc).unwrap();
    assert_eq!(other.name(), "Still life");
    assert_eq!(other.shapes(), engine.shapes());
}
