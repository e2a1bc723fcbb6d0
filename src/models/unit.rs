use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Measurement unit. Global reference data, not owned by any account.
#[derive(Debug, Clone, FromRow)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
