// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use gramdash::services::{AccountLinker, ApiClient, SessionStore};
use gramdash::store::TokenStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Fully wired client pointed at a mock backend, with a throwaway
/// credential slot.
pub struct TestClient {
    pub session: Arc<SessionStore>,
    pub linker: AccountLinker,
    pub store: TokenStore,
    _dir: TempDir,
}

/// Build a test client against the given mock server URI.
#[allow(dead_code)]
pub fn test_client(server_uri: &str) -> TestClient {
    let dir = TempDir::new().expect("temp dir");
    let store = TokenStore::new(dir.path().join("token.json"));

    let api = ApiClient::new(server_uri, Duration::from_secs(5)).expect("api client");
    let session = Arc::new(SessionStore::new(api.clone(), store.clone()));
    let linker = AccountLinker::new(api, session.clone());

    TestClient {
        session,
        linker,
        store,
        _dir: dir,
    }
}

/// Backend login response body.
#[allow(dead_code)]
pub fn credential_json() -> serde_json::Value {
    json!({
        "access_token": "eyJhbGciOiJIUzI1NiJ9.session",
        "token_type": "bearer"
    })
}

/// Backend user body for `/auth/me` and `/auth/register`.
#[allow(dead_code)]
pub fn user_json() -> serde_json::Value {
    json!({
        "id": 42,
        "email": "maria@example.com",
        "username": "maria",
        "first_name": "Maria",
        "last_name": null,
        "is_active": true,
        "is_verified": false,
        "created_at": "2025-06-30T23:26:00Z"
    })
}

/// Linked account body with the given id.
#[allow(dead_code)]
pub fn account_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "instagram_user_id": format!("1784140000000{}", id),
        "username": format!("brand_{}", id),
        "account_type": "BUSINESS",
        "media_count": 12,
        "followers_count": 3400,
        "follows_count": 120,
        "access_token": "IGQVJexample",
        "token_expires_at": "2026-12-01T00:00:00Z",
        "is_active": true,
        "created_at": "2025-07-01T10:00:00Z",
        "updated_at": "2025-07-02T10:00:00Z"
    })
}

/// Media item body with the given id.
#[allow(dead_code)]
pub fn media_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "instagram_media_id": format!("9000000000{}", id),
        "media_type": "IMAGE",
        "media_url": "https://cdn.example.com/p.jpg",
        "permalink": "https://www.instagram.com/p/abc/",
        "caption": "launch day",
        "timestamp": "2025-07-01T12:00:00Z",
        "like_count": 31,
        "comments_count": 4,
        "created_at": "2025-07-01T12:05:00Z"
    })
}
