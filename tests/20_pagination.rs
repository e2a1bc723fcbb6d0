//! Pagination validation happens before any storage work, so these run
//! without a database behind the pools.

mod common;

use axum::http::StatusCode;

use common::*;

#[tokio::test]
async fn negative_page_size_is_rejected() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/list?pageSize=-1", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAGE_SIZE");
    assert_eq!(body["error"], "The page size provided is invalid.");
}

#[tokio::test]
async fn negative_page_index_is_rejected() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/list?page=-1", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAGE_INDEX");
}

#[tokio::test]
async fn page_size_is_checked_before_page_index() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/list?pageSize=-5&page=-5", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAGE_SIZE");
}

#[tokio::test]
async fn astronomically_large_window_is_rejected_not_wrapped() {
    // page * pageSize would overflow i64; the request must fail cleanly
    // instead of reaching storage with a wrapped offset.
    let (status, body) = send(
        app(),
        get_with_token(
            "/api/account/list?page=4611686018427387903&pageSize=10",
            &valid_token(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAGE_INDEX");
}

#[tokio::test]
async fn reference_lists_validate_the_same_window() {
    for path in [
        "/api/sensor/list?pageSize=-2",
        "/api/unit/list?pageSize=-2",
        "/api/model/list?pageSize=-2",
    ] {
        let (status, body) = send(app(), get_with_token(path, &valid_token())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path {path}");
        assert_eq!(body["code"], "ERR_BAD_PAGE_SIZE", "path {path}");
    }
}

#[tokio::test]
async fn nested_list_validates_before_ownership_data_access() {
    let (status, body) = send(
        app(),
        get_with_token("/api/account/1/device/list?page=-3", &valid_token()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_BAD_PAGE_INDEX");
}
