use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use engine::Engine;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::{Value, json};
use server::{ServerState, router};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn authed(method: &str, uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/user/register",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await
}

async fn add_entry(app: &Router, auth: &str, body: Value) -> Value {
    let (status, body) = send(app, json_request("POST", "/entries", Some(auth), body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn register_returns_created_user_without_password() {
    let app = app().await;

    let (status, body) = register(&app, "alice", "secret").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["roles"], json!(["USER"]));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = app().await;
    register(&app, "alice", "secret").await;

    let (status, body) = register(&app, "alice", "other").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("alice"));
}

#[tokio::test]
async fn blank_credentials_are_unprocessable() {
    let app = app().await;

    let (status, _) = register(&app, "  ", "secret").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_or_wrong_credentials_are_unauthorized() {
    let app = app().await;
    register(&app, "alice", "secret").await;

    let request = Request::builder()
        .uri("/entries")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed("GET", "/entries", &basic("alice", "nope"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed("GET", "/entries", &basic("bob", "secret"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_lookup() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");

    let (status, body) = send(&app, authed("GET", "/user/alice", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");

    let (status, _) = send(&app, authed("GET", "/user/ghost", &auth)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entries_roundtrip_with_defaults() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");

    let created = add_entry(
        &app,
        &auth,
        json!({ "price": -120, "date": "2024-05-02", "category": "FOOD" }),
    )
    .await;
    assert_eq!(created["name"], "2024-05-02");
    assert_eq!(created["category"], "FOOD");

    let (status, body) = send(&app, authed("GET", "/entries", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([created]));
}

#[tokio::test]
async fn random_entry_is_created() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");

    let (status, body) = send(&app, authed("POST", "/entries/random", &auth)).await;

    assert_eq!(status, StatusCode::CREATED);
    let date = body["date"].as_str().unwrap();
    assert!(date.starts_with("2020-"), "unexpected date {date}");
}

#[tokio::test]
async fn range_queries() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");
    for (price, date) in [(-10, "2024-01-01"), (50, "2024-02-01"), (-700, "2024-03-01")] {
        add_entry(&app, &auth, json!({ "price": price, "date": date })).await;
    }

    let (status, body) = send(
        &app,
        authed("GET", "/entries/between/dates/2024-01-01/2024-02-01", &auth),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) =
        send(&app, authed("GET", "/entries/between/price/-100/100", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    let prices: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["price"].as_i64().unwrap())
        .collect();
    assert_eq!(prices, vec![-10, 50]);

    let (status, _) = send(&app, authed("GET", "/entries/between/price/100/-100", &auth)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_category() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");
    let created = add_entry(&app, &auth, json!({ "price": -5 })).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        authed("PUT", &format!("/entries/{id}/category/pets"), &auth),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "PETS");

    let (status, _) = send(
        &app,
        authed("PUT", &format!("/entries/{id}/category/TOYS"), &auth),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, authed("PUT", "/entries/999/category/FOOD", &auth)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_views() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");
    for (price, category) in [
        (-7000, "PETS"),
        (-2000, "FOOD"),
        (-700, "TRANSPORTATION"),
        (-600, "HOUSEHOLD"),
        (-200, "MISCELLANEOUS"),
        (-100, "BILLS"),
        (1000, "PAYMENT"),
    ] {
        add_entry(&app, &auth, json!({ "price": price, "category": category })).await;
    }

    let (status, body) = send(&app, authed("GET", "/category/top-spending", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "category": "PETS", "price": -7000 },
            { "category": "FOOD", "price": -2000 },
            { "category": "TRANSPORTATION", "price": -700 },
            { "category": "HOUSEHOLD", "price": -600 },
            { "category": "MISCELLANEOUS", "price": -200 },
        ])
    );

    let (_, body) = send(&app, authed("GET", "/category/top-spending?n=2", &auth)).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, authed("GET", "/category/expense/count", &auth)).await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(&app, authed("GET", "/category/all/count", &auth)).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[6], json!({ "category": "PAYMENT", "price": 1000 }));
}

#[tokio::test]
async fn users_only_see_their_own_entries() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    register(&app, "bob", "hunter2").await;
    let alice = basic("alice", "secret");
    let bob = basic("bob", "hunter2");
    let created = add_entry(&app, &alice, json!({ "price": -5 })).await;
    let id = created["id"].as_i64().unwrap();

    let (_, body) = send(&app, authed("GET", "/entries", &bob)).await;
    assert_eq!(body, json!([]));

    let (status, _) = send(
        &app,
        authed("PUT", &format!("/entries/{id}/category/FOOD"), &bob),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_input_is_a_json_validation_error() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    let auth = basic("alice", "secret");

    for uri in [
        "/entries/between/dates/2024-13-01/2024-02-01",
        "/entries/between/price/abc/10",
        "/entries/abc/category/FOOD",
        "/category/top-spending?n=-1",
    ] {
        let method = if uri.contains("/category/FOOD") { "PUT" } else { "GET" };
        let (status, body) = send(&app, authed(method, uri, &auth)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }

    let (status, body) = send(
        &app,
        json_request("POST", "/entries", Some(&auth), json!({ "price": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        json_request("POST", "/user/register", None, json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}
