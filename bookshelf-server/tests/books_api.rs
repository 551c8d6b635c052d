//! End-to-end tests for the /books routes against an in-memory database

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bookshelf_server::db::create_memory_pool;
use bookshelf_server::{build_router, AppState, ServerConfig};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let pool = create_memory_pool().await.expect("memory pool");
    let state = AppState::sqlite(pool).await.expect("state");
    build_router(state, &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn create(app: &Router, title: &str, price: f64, year: i32) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/books",
        Some(json!({ "title": title, "price": price, "publicationYear": year })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("id in response").to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_fetch_by_id() {
    let app = app().await;
    let id = create(&app, "Dune", 12.50, 1965).await;
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let (status, body) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["price"].as_f64(), Some(12.5));
    assert_eq!(body["publicationYear"], 1965);
}

#[tokio::test]
async fn large_price_round_trips_exactly() {
    let app = app().await;
    let (status, created) = send_raw(
        &app,
        "POST",
        "/books",
        r#"{"title":"Big","price":12345678901234567.89,"publicationYear":2000}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id: Value = serde_json::from_str(&created).unwrap();

    let uri = format!("/books/{}", id["id"].as_str().unwrap());
    let (status, body) = send_raw(&app, "GET", &uri, "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""price":12345678901234567.89"#), "{body}");
}

#[tokio::test]
async fn missing_body_field_is_json_400() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/books", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("price"));

    let (_, list) = send(&app, "GET", "/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_body_is_json_400() {
    let app = app().await;
    let (status, body) = send_raw(&app, "POST", "/books", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn non_numeric_page_is_json_400() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/books?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn fetch_by_exact_title() {
    let app = app().await;
    let id = create(&app, "Dune", 12.50, 1965).await;

    let (status, body) = send(&app, "GET", "/books/Dune", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _) = send(&app, "GET", "/books/dune", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_id_is_404() {
    let app = app().await;
    let uri = format!("/books/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn future_year_is_rejected_and_not_persisted() {
    let app = app().await;
    let next_year = Utc::now().year() + 1;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "title": "Later", "price": 1.0, "publicationYear": next_year })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["violations"][0]["field"], "publicationYear");

    let (_, list) = send(&app, "GET", "/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_returns_all_books() {
    let app = app().await;
    create(&app, "Book 1", 10.99, 2000).await;
    create(&app, "Book 2", 12.99, 2010).await;

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn list_paginates_with_total_header() {
    let app = app().await;
    for i in 0..5 {
        create(&app, &format!("Book {i}"), 1.0, 2000).await;
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/books?page=2&per_page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "5");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(page.as_array().map(Vec::len), Some(2));

    let (_, last) = send(&app, "GET", "/books?page=3&per_page=2", None).await;
    assert_eq!(last.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn update_existing_book() {
    let app = app().await;
    let id = create(&app, "Dune", 12.50, 1965).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{}", id),
        Some(json!({ "title": "Dune Messiah", "price": 9.99, "publicationYear": 1969 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (_, book) = send(&app, "GET", &format!("/books/{}", id), None).await;
    assert_eq!(book["title"], "Dune Messiah");
    assert_eq!(book["publicationYear"], 1969);
}

#[tokio::test]
async fn update_missing_book_is_404() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/books/{}", uuid::Uuid::new_v4()),
        Some(json!({ "title": "Ghost", "price": 1.0, "publicationYear": 2000 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_update_is_400() {
    let app = app().await;
    let id = create(&app, "Dune", 12.50, 1965).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{}", id),
        Some(json!({ "title": "  ", "price": 1.0, "publicationYear": 1965 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["violations"][0]["field"], "title");
}

#[tokio::test]
async fn non_uuid_path_is_400_for_writes() {
    let app = app().await;

    let (status, body) = send(&app, "DELETE", "/books/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = send(
        &app,
        "PUT",
        "/books/not-a-uuid",
        Some(json!({ "title": "x", "price": 1.0, "publicationYear": 2000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app().await;
    let id = create(&app, "Dune", 12.50, 1965).await;
    let uri = format!("/books/{}", id);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
