//! Devices nested under an account, plus lookup by serial number.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use serde_json::json;

use crate::auth::Principal;
use crate::dto::{DeviceRequest, DeviceResponse};
use crate::error::{ApiError, DomainError};
use crate::handlers::authorize_account;
use crate::middleware::RequestId;
use crate::pagination::{PageQuery, PageRequest};
use crate::response;
use crate::state::AppState;

fn parse_body(
    body: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<DeviceRequest, DomainError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(DomainError::BadPayload(rejection.body_text())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(account_id): Path<i64>,
    body: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    let device = state
        .devices
        .add_device(account_id, &request)
        .await
        .map_err(fail)?;
    Ok(response::created(rid.as_str(), DeviceResponse::from(&device)))
}

pub async fn fetch(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, device_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let device = state
        .devices
        .fetch_device(account_id, device_id)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), DeviceResponse::from(&device)))
}

/// Serial lookup is not nested under an account path; the owner is taken
/// from the token.
pub async fn fetch_by_serial(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(serial_number): Path<String>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let device = state
        .devices
        .fetch_device_by_serial(principal.account_id, &serial_number)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), DeviceResponse::from(&device)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, device_id)): Path<(i64, i64)>,
    body: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    let device = state
        .devices
        .update_device(account_id, device_id, &request)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), DeviceResponse::from(&device)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, device_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    state
        .devices
        .delete_device(account_id, device_id)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), json!({"id": device_id})))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(account_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let page = PageRequest::parse(&query).map_err(fail)?;
    let result = state
        .devices
        .list_devices(account_id, page)
        .await
        .map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|d| DeviceResponse::from(&d)),
    ))
}
