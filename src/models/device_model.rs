use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Device model definition. Global reference data, not owned by any account.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceModel {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
