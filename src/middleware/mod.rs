pub mod auth;
pub mod request_id;

pub use auth::require_token;
pub use request_id::{propagate_request_id, RequestId};
