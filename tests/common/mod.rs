// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use warmpaws::config::Config;
use warmpaws::db::{KeyValueStore, MemoryStore};
use warmpaws::routes::create_router;
use warmpaws::services::{CatalogService, GoogleIdentityProvider, HomeContent, SessionStore};
use warmpaws::AppState;

pub const TEST_KID: &str = "test-kid";
const TEST_SECRET: &[u8] = b"warmpaws-test-identity-secret";

/// Create a test app over a fresh in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Create a test app whose session persists to `store`.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: Arc<dyn KeyValueStore>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let catalog =
        CatalogService::load_from_file("data/services.json").expect("Failed to load catalog");
    let content = HomeContent::load_from_files(&config.winter_tips_path, &config.experts_path)
        .expect("Failed to load home content");
    let identity = GoogleIdentityProvider::with_static_key(
        &config.google_client_id,
        TEST_KID,
        Algorithm::HS256,
        DecodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to build identity provider");

    let state = Arc::new(AppState {
        config,
        catalog,
        content,
        sessions: SessionStore::initialize(store),
        identity: Arc::new(identity),
    });

    (create_router(state.clone()), state)
}

/// Sign a Google-style ID token the test identity provider accepts.
#[allow(dead_code)]
pub fn create_test_id_token(config: &Config, name: &str, email: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = json!({
        "iss": "accounts.google.com",
        "aud": config.google_client_id,
        "sub": "109876543210",
        "iat": now,
        "exp": now + 3600,
        "email": email,
        "email_verified": true,
        "name": name,
    });

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(TEST_KID.to_string());
    encode(&header, &claims, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
}

/// Send a request and decode the JSON body (Null when empty).
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sign in through the local form.
#[allow(dead_code)]
pub async fn sign_in(app: &axum::Router) {
    let (status, _, _) = send(
        app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "mia@example.com", "password": "whatever" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
