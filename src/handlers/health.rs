//! Liveness endpoint. Reports process health without touching storage so it
//! stays green while the database is briefly unavailable.

use axum::response::Response;
use axum::Extension;
use serde_json::json;

use crate::middleware::RequestId;
use crate::response;

pub async fn health(Extension(rid): Extension<RequestId>) -> Response {
    response::ok(
        rid.as_str(),
        json!({
            "status": "up",
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}
