//! Reference catalog reads: sensors, units, device models. Requires a token
//! but no ownership, the catalog is shared across accounts.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Extension;

use crate::dto::{ModelResponse, SensorResponse, UnitResponse};
use crate::error::{ApiError, DomainError};
use crate::middleware::RequestId;
use crate::pagination::{PageQuery, PageRequest};
use crate::response;
use crate::state::AppState;

pub async fn fetch_sensor(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(sensor_id): Path<i64>,
) -> Result<Response, ApiError> {
    let sensor = state
        .devices
        .fetch_sensor(sensor_id)
        .await
        .map_err(|e| e.with_request_id(rid.as_str()))?;
    Ok(response::ok(rid.as_str(), SensorResponse::from(&sensor)))
}

pub async fn list_sensors(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let page = PageRequest::parse(&query).map_err(fail)?;
    let result = state.devices.list_sensors(page).await.map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|s| SensorResponse::from(&s)),
    ))
}

pub async fn fetch_unit(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(unit_id): Path<i64>,
) -> Result<Response, ApiError> {
    let unit = state
        .devices
        .fetch_unit(unit_id)
        .await
        .map_err(|e| e.with_request_id(rid.as_str()))?;
    Ok(response::ok(rid.as_str(), UnitResponse::from(&unit)))
}

pub async fn fetch_unit_by_name(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let unit = state
        .devices
        .fetch_unit_by_name(&name)
        .await
        .map_err(|e| e.with_request_id(rid.as_str()))?;
    Ok(response::ok(rid.as_str(), UnitResponse::from(&unit)))
}

pub async fn list_units(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let page = PageRequest::parse(&query).map_err(fail)?;
    let result = state.devices.list_units(page).await.map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|u| UnitResponse::from(&u)),
    ))
}

pub async fn fetch_model(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Path(model_id): Path<i64>,
) -> Result<Response, ApiError> {
    let model = state
        .devices
        .fetch_model(model_id)
        .await
        .map_err(|e| e.with_request_id(rid.as_str()))?;
    Ok(response::ok(rid.as_str(), ModelResponse::from(&model)))
}

pub async fn list_models(
    State(state): State<AppState>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let fail = |e: DomainError| e.with_request_id(rid.as_str());
    let page = PageRequest::parse(&query).map_err(fail)?;
    let result = state.devices.list_models(page).await.map_err(fail)?;
    Ok(response::list(
        rid.as_str(),
        result.map(|m| ModelResponse::from(&m)),
    ))
}
