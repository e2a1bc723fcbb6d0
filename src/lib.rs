//! Multi-tenant device management API.
//!
//! Accounts own users, addresses and devices; sensors, units and device
//! models form a shared reference catalog. Every protected request is
//! authenticated by a bearer token and scoped to the token's account.

pub mod auth;
pub mod config;
pub mod datastore;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod ownership;
pub mod pagination;
pub mod response;
pub mod services;
pub mod state;

pub use handlers::router;
pub use state::AppState;
