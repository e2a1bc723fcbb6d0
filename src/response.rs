//! Success envelopes. Every 2xx body carries the request id, a fixed status
//! code of "00" and a human-readable message; list responses additionally
//! echo the page window and the total row count.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pagination::PageResult;

pub const STATUS_OK: &str = "00";
pub const MESSAGE_OK: &str = "Request performed successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiData<T: Serialize> {
    pub request_id: String,
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiList<T: Serialize> {
    pub request_id: String,
    pub status: &'static str,
    pub message: &'static str,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub data: Vec<T>,
}

/// 200 OK with the standard envelope.
pub fn ok<T: Serialize>(request_id: &str, data: T) -> Response {
    with_status(StatusCode::OK, request_id, data)
}

/// 201 Created with the standard envelope.
pub fn created<T: Serialize>(request_id: &str, data: T) -> Response {
    with_status(StatusCode::CREATED, request_id, data)
}

pub fn with_status<T: Serialize>(status: StatusCode, request_id: &str, data: T) -> Response {
    let body = ApiData {
        request_id: request_id.to_string(),
        status: STATUS_OK,
        message: MESSAGE_OK,
        data,
    };
    (status, Json(body)).into_response()
}

/// 200 OK with the list envelope.
pub fn list<T: Serialize>(request_id: &str, result: PageResult<T>) -> Response {
    let body = ApiList {
        request_id: request_id.to_string(),
        status: STATUS_OK,
        message: MESSAGE_OK,
        page: result.page,
        page_size: result.page_size,
        total: result.total,
        data: result.data,
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_envelope_shape() {
        let body = ApiData {
            request_id: "rid-1".to_string(),
            status: STATUS_OK,
            message: MESSAGE_OK,
            data: serde_json::json!({"id": 7}),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["requestId"], "rid-1");
        assert_eq!(value["status"], "00");
        assert_eq!(value["message"], "Request performed successfully");
        assert_eq!(value["data"]["id"], 7);
    }

    #[test]
    fn list_envelope_carries_window_and_total() {
        let body = ApiList {
            request_id: "rid-2".to_string(),
            status: STATUS_OK,
            message: MESSAGE_OK,
            page: 2,
            page_size: 25,
            total: 133,
            data: vec![1, 2, 3],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["pageSize"], 25);
        assert_eq!(value["total"], 133);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
    }
}
