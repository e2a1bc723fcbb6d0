pub mod account;
pub mod address;
pub mod auth;
pub mod device;
pub mod health;
pub mod reference;
pub mod user;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::Principal;
use crate::error::DomainError;
use crate::middleware::{propagate_request_id, require_token};
use crate::state::AppState;

/// A caller may only touch resources under their own account. A foreign
/// account id in the path is reported as if the account did not exist.
pub(crate) fn authorize_account(
    principal: &Principal,
    account_id: i64,
) -> Result<(), DomainError> {
    if principal.account_id != account_id {
        return Err(DomainError::NotFoundAccountById);
    }
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/refresh", post(auth::refresh))
        .route("/api/account", post(account::create))
        .route("/api/account/list", get(account::list))
        .route("/api/account/:account_id/fetch", get(account::fetch))
        .route("/api/account/:account_id/update", put(account::update))
        .route("/api/account/:account_id/delete", delete(account::remove))
        .route("/api/account/:account_id/user", post(user::create))
        .route("/api/account/:account_id/user/list", get(user::list))
        .route("/api/account/:account_id/user/:user_id/fetch", get(user::fetch))
        .route("/api/account/:account_id/user/:user_id/update", put(user::update))
        .route("/api/account/:account_id/user/:user_id/delete", delete(user::remove))
        .route("/api/account/:account_id/address", post(address::create))
        .route("/api/account/:account_id/address/list", get(address::list))
        .route("/api/account/:account_id/address/:address_id/fetch", get(address::fetch))
        .route("/api/account/:account_id/address/:address_id/update", put(address::update))
        .route("/api/account/:account_id/address/:address_id/delete", delete(address::remove))
        .route("/api/account/:account_id/device", post(device::create))
        .route("/api/account/:account_id/device/list", get(device::list))
        .route("/api/account/:account_id/device/:device_id/fetch", get(device::fetch))
        .route("/api/account/:account_id/device/:device_id/update", put(device::update))
        .route("/api/account/:account_id/device/:device_id/delete", delete(device::remove))
        .route("/api/device/serial/:serial_number/fetch", get(device::fetch_by_serial))
        .route("/api/sensor/list", get(reference::list_sensors))
        .route("/api/sensor/:sensor_id/fetch", get(reference::fetch_sensor))
        .route("/api/unit/list", get(reference::list_units))
        .route("/api/unit/:unit_id/fetch", get(reference::fetch_unit))
        .route("/api/unit/name/:name/fetch", get(reference::fetch_unit_by_name))
        .route("/api/model/list", get(reference::list_models))
        .route("/api/model/:model_id/fetch", get(reference::fetch_model))
        .layer(from_fn_with_state(state.clone(), require_token))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(propagate_request_id))
        .with_state(state)
}
