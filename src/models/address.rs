use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A postal address under an account; scoped to its owning account.
#[derive(Debug, Clone, FromRow)]
pub struct Address {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
