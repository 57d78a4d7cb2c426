//! Error page tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};

use crate::common::{
    app, app_with_mode, get, post_form, send, MemoryStore, PanickingStore, UnavailableStore,
};

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let app = app(MemoryStore::new());

    let response = get(&app, "/no/such/page").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found"));
    assert!(response.body.contains("<h2>404</h2>"));
}

#[tokio::test]
async fn test_development_shows_error_detail() {
    let app = app_with_mode(MemoryStore::new(), "development");

    let response = get(&app, "/books/77").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Book 77 not found"));
}

#[tokio::test]
async fn test_production_hides_error_detail() {
    let app = app_with_mode(MemoryStore::new(), "production");

    let response = get(&app, "/books/77").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found"));
    assert!(!response.body.contains("Book 77 not found"));
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let app = app_with_mode(Arc::new(UnavailableStore), "production");

    let response = get(&app, "/books").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Server Error"));
    assert!(!response.body.contains("Database error"));
}

#[tokio::test]
async fn test_store_failure_on_create_is_server_error() {
    let app = app(Arc::new(UnavailableStore));

    let response = post_form(&app, "/books", "title=Dune&author=Herbert&year=1965").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Database error"));
}

#[tokio::test]
async fn test_panic_is_server_error() {
    let app = app(Arc::new(PanickingStore));

    let response = get(&app, "/books/1").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("lookup exploded"));
}

#[tokio::test]
async fn test_health_and_readiness() {
    let healthy = app(MemoryStore::new());
    let response = get(&healthy, "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("healthy"));

    let response = get(&healthy, "/ready").await;
    assert_eq!(response.status, StatusCode::OK);

    let unavailable = app(Arc::new(UnavailableStore));
    let response = get(&unavailable, "/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_static_assets() {
    let app = app(MemoryStore::new());

    let response = get(&app, "/static/css/style.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("#container"));

    let response = get(&app, "/static/missing.css").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<h2>404</h2>"));
}

#[tokio::test]
async fn test_unreadable_listing_query_renders_error_page() {
    let app = app_with_mode(MemoryStore::new(), "production");

    let response = get(&app, "/books?page=1&page=2").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("<h2>400</h2>"));
    assert!(!response.body.contains("duplicate field"));
}

#[tokio::test]
async fn test_unreadable_search_query_renders_error_page() {
    let app = app_with_mode(MemoryStore::new(), "production");

    let response = get(&app, "/books/search?query=a&query=b").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("<h2>400</h2>"));
    assert!(!response.body.contains("duplicate field"));
}

#[tokio::test]
async fn test_form_without_content_type_renders_error_page() {
    let store = MemoryStore::new();
    let app = app_with_mode(store.clone(), "production");

    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .body(Body::from("title=Dune&author=Herbert&year=1965"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(response.body.contains("<h2>415</h2>"));
    assert!(!response.body.contains("Content-Type"));
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_rejection_detail_shown_in_development() {
    let app = app_with_mode(MemoryStore::new(), "development");

    let response = get(&app, "/books?page=1&page=2").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("duplicate field"));
}
