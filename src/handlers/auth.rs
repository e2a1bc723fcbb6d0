//! Login, logout and token refresh.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Extension, Json};
use serde_json::json;
use tracing::info;

use crate::auth::generate_refresh_token;
use crate::dto::{LoginRequest, LoginResponse, LoginUserInfo, RefreshResponse};
use crate::error::{ApiError, DomainError};
use crate::middleware::RequestId;
use crate::response;
use crate::state::AppState;

pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

const DEFAULT_ROLE: &str = "user";

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, DomainError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(DomainError::BadPayload(rejection.body_text())),
    }
}

fn refresh_token_from(headers: &HeaderMap) -> Result<&str, DomainError> {
    headers
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(DomainError::MissingToken)
}

pub async fn login(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());

    let request = parse_body(body).map_err(fail)?;
    request.validate().map_err(fail)?;

    let account = state
        .customers
        .authenticate(&request.email, &request.password)
        .await
        .map_err(fail)?;
    let (token, expires_at) = state
        .signer
        .generate(account.id, DEFAULT_ROLE)
        .map_err(fail)?;

    info!(account_id = account.id, "login succeeded");
    Ok(response::created(
        rid.as_str(),
        LoginResponse {
            token,
            refresh_token: generate_refresh_token(),
            expires_at,
            user: LoginUserInfo {
                id: account.id,
                email: account.email,
                name: account.name,
                role: DEFAULT_ROLE.to_string(),
                created_at: account.created_at,
            },
        },
    ))
}

pub async fn refresh(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());

    refresh_token_from(&headers).map_err(fail)?;
    let request = parse_body(body).map_err(fail)?;
    request.validate().map_err(fail)?;

    let account = state
        .customers
        .authenticate(&request.email, &request.password)
        .await
        .map_err(fail)?;
    let (token, expires_at) = state
        .signer
        .generate(account.id, DEFAULT_ROLE)
        .map_err(fail)?;

    info!(account_id = account.id, "token refreshed");
    Ok(response::ok(
        rid.as_str(),
        RefreshResponse { token, expires_at },
    ))
}

pub async fn logout(
    Extension(rid): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    refresh_token_from(&headers).map_err(|e| e.with_request_id(rid.as_str()))?;
    Ok(response::ok(rid.as_str(), json!({"message": "Logged out"})))
}
