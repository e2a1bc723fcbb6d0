use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A person under an account; scoped to its owning account.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub account_id: i64,
    pub email: String,
    pub cell: String,
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
    pub receives_updates: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
