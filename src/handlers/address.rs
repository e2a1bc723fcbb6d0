//! Addresses nested under an account.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use serde_json::json;

use crate::auth::Principal;
use crate::dto::{AddressRequest, AddressResponse};
use crate::error::{ApiError, DomainError};
use crate::handlers::authorize_account;
use crate::middleware::RequestId;
use crate::pagination::{PageQuery, PageRequest};
use crate::response;
use crate::state::AppState;

fn parse_body(
    body: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<AddressRequest, DomainError> {
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
    body: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    let address = state
        .customers
        .add_address(account_id, &request)
        .await
        .map_err(fail)?;
    Ok(response::created(rid.as_str(), AddressResponse::from(&address)))
}

pub async fn fetch(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, address_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let address = state
        .customers
        .fetch_address(account_id, address_id)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), AddressResponse::from(&address)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, address_id)): Path<(i64, i64)>,
    body: Result<Json<AddressRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    let address = state
        .customers
        .update_address(account_id, address_id, &request)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), AddressResponse::from(&address)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path((account_id, address_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    state
        .customers
        .delete_address(account_id, address_id)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), json!({"id": address_id})))
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
        .customers
        .list_addresses(account_id, page)
        .await
        .map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|a| AddressResponse::from(&a)),
    ))
}
