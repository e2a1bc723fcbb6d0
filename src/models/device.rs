use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// A physical device registered under an account. The serial number and
/// model reference are fixed at registration; only the name and the model
/// configuration may change afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Device {
    pub id: i64,
    pub account_id: i64,
    pub model_id: i64,
    pub name: String,
    pub serial_number: String,
    pub model_config: Value,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
