//! The bearer-token gate: every protected route demands a valid token, the
//! public allow-list passes through untouched.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let (status, body) = send(app(), get("/api/account/1/fetch")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_MISSING_TOKEN");
    assert_eq!(body["error"], "No token provided.");
}

#[tokio::test]
async fn non_bearer_authorization_counts_as_missing() {
    let request = axum::http::Request::builder()
        .uri("/api/account/1/fetch")
        .header("authorization", "Basic dXNlcjpwdw==")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_MISSING_TOKEN");
}

#[tokio::test]
async fn garbage_token_is_malformed() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/1/fetch", "not-a-jwt"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_MALFORMED_TOKEN");
}

#[tokio::test]
async fn token_signed_with_another_key_is_invalid() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/1/fetch", &foreign_token()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_BAD_TOKEN");
}

#[tokio::test]
async fn expired_token_is_rejected_as_expired() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/1/fetch", &expired_token()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_EXPIRED_TOKEN");
}

#[tokio::test]
async fn health_needs_no_token() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "00");
    assert_eq!(body["data"]["status"], "up");
}

#[tokio::test]
async fn allow_list_matches_whole_paths_only() {
    // A path that merely starts with a public prefix is still protected.
    let (status, body) = send(app(), get("/api/account/list")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_MISSING_TOKEN");
}

#[tokio::test]
async fn allow_list_is_case_insensitive() {
    // The gate lets the odd-cased path through; the router then 404s it
    // instead of the gate answering 401.
    let (status, _) = send(app(), get("/API/LOGIN")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_requires_refresh_token_header() {
    let (status, body) = send(app(), post_json("/api/logout", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_MISSING_TOKEN");
}

#[tokio::test]
async fn logout_with_refresh_token_succeeds() {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/logout")
        .header("x-refresh-token", "opaque-refresh-token")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "00");
    assert_eq!(body["message"], "Request performed successfully");
}

#[tokio::test]
async fn foreign_account_path_reads_as_not_found() {
    // Token is for account 1; touching account 2 looks like a missing
    // account, not a permission error.
    let (status, body) = send(
        app(),
        get_with_token("/api/account/2/fetch", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERR_NOT_FOUND_ACCOUNT_BY_ID");
}

#[tokio::test]
async fn login_with_malformed_json_is_bad_payload() {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAYLOAD_FIELDS");
}

#[tokio::test]
async fn login_with_empty_password_is_bad_payload() {
    let (status, body) = send(
        app(),
        post_json("/api/login", json!({"email": "a@x.com", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAYLOAD_FIELDS");
}
