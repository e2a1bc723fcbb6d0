//! Account CRUD. Creation is public (sign-up); everything else requires a
//! token for the same account id as in the path, except the unscoped list.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use serde_json::json;

use crate::auth::Principal;
use crate::dto::{AccountRequest, AccountResponse};
use crate::error::{ApiError, DomainError};
use crate::handlers::authorize_account;
use crate::middleware::RequestId;
use crate::pagination::{PageQuery, PageRequest};
use crate::response;
use crate::state::AppState;

fn parse_body(
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<AccountRequest, DomainError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(DomainError::BadPayload(rejection.body_text())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let request = parse_body(body).map_err(fail)?;
    let account = state.customers.add_account(&request).await.map_err(fail)?;
    Ok(response::created(rid.as_str(), AccountResponse::from(&account)))
}

pub async fn fetch(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(account_id): Path<i64>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let account = state.customers.fetch_account(account_id).await.map_err(fail)?;
    Ok(response::ok(rid.as_str(), AccountResponse::from(&account)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(account_id): Path<i64>,
    body: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    let account = state
        .customers
        .update_account(account_id, &request)
        .await
        .map_err(fail)?;
    Ok(response::ok(rid.as_str(), AccountResponse::from(&account)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Extension(principal): Extension<Principal>,
    Path(account_id): Path<i64>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    authorize_account(&principal, account_id).map_err(fail)?;
    state.customers.delete_account(account_id).await.map_err(fail)?;
    Ok(response::ok(rid.as_str(), json!({"id": account_id})))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let page = PageRequest::parse(&query).map_err(fail)?;
    let result = state.customers.list_accounts(page).await.map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|a| AccountResponse::from(&a)),
    ))
}
