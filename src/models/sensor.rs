use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// Sensor type definition. Global reference data, not owned by any account.
#[derive(Debug, Clone, FromRow)]
pub struct Sensor {
    pub id: i64,
    pub unit_id: i64,
    pub code: String,
    pub name: String,
    pub config_required: Value,
    pub default_config: Value,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
