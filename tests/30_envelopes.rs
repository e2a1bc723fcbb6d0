//! Envelope and request-id contract, plus the internal-failure fallback.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn client_request_id_is_echoed_in_header_and_body() {
    let request = Request::builder()
        .uri("/api/account/1/fetch")
        .header("x-request-id", "trace-me-42")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.expect("response");
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-42"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["requestId"], "trace-me-42");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let response = app().oneshot(get("/health")).await.expect("response");
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");
    assert!(!header.is_empty());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["requestId"], header.as_str());
}

#[tokio::test]
async fn success_envelope_has_fixed_status_and_message() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "00");
    assert_eq!(body["message"], "Request performed successfully");
    assert!(body["data"].is_object());
}

#[tokio::test]
async fn error_envelope_has_code_and_description_only() {
    let (_, body) = send(app(), get("/api/account/1/fetch")).await;
    assert!(body.get("requestId").is_some());
    assert!(body.get("code").is_some());
    assert!(body.get("error").is_some());
    assert!(body.get("status").is_none());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn storage_failure_maps_to_internal_exception_with_400() {
    // Pools point at an unreachable port; the first real query fails and the
    // taxonomy's fallback answers 400, not 500.
    let (status, body) = send(
        app(),
        get_with_token("/api/account/1/fetch", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_INTERNAL_EXCEPTION");
    assert_eq!(body["error"], "An internal server error occurred.");
}

#[tokio::test]
async fn login_against_dead_storage_still_wraps_internal_error() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/login",
            serde_json::json!({"email": "a@x.com", "password": "pw"}),
        ),
    )
    .await;
    // Credential lookup failures collapse to Unauthorized regardless of the
    // underlying cause.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ERR_UNAUTHORIZED");
}
