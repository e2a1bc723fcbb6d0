//! JSON request and response shapes. The wire format is camelCase; entities
//! stay snake_case internally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::models::{Account, Address, Device, DeviceModel, Sensor, Unit, User};

// ---------------------------------------------------------------------------
// Requests

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub receives_updates: bool,
}

impl AccountRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(DomainError::BadPayload("field 'email' is invalid".into()));
        }
        if self.name.is_empty() {
            return Err(DomainError::BadPayload("field 'name' is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: String,
    #[serde(default)]
    pub cell: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub receives_updates: bool,
}

impl UserRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err(DomainError::BadPayload("field 'email' is invalid".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    pub model_id: i64,
    pub name: String,
    pub serial_number: String,
    #[serde(default)]
    pub model_config: Value,
    /// Optional redundant owner reference; when present it must agree with
    /// the account in the path.
    #[serde(default)]
    pub account_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() {
            return Err(DomainError::BadPayload("field 'email' is required".into()));
        }
        if self.password.is_empty() {
            return Err(DomainError::BadPayload("field 'password' is required".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Responses

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub receives_updates: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            receives_updates: account.receives_updates,
            created_at: account.created_at,
            modified_at: account.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub cell: String,
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
    pub receives_updates: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            cell: user.cell.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            verified: user.verified,
            receives_updates: user.receives_updates,
            created_at: user.created_at,
            modified_at: user.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: i64,
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

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id,
            name: address.name.clone(),
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            created_at: address.created_at,
            modified_at: address.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: i64,
    pub account_id: i64,
    pub model_id: i64,
    pub name: String,
    pub serial_number: String,
    pub model_config: Value,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Device> for DeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            account_id: device.account_id,
            model_id: device.model_id,
            name: device.name.clone(),
            serial_number: device.serial_number.clone(),
            model_config: device.model_config.clone(),
            created_at: device.created_at,
            modified_at: device.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorResponse {
    pub id: i64,
    pub unit_id: i64,
    pub code: String,
    pub name: String,
    pub config_required: Value,
    pub default_config: Value,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Sensor> for SensorResponse {
    fn from(sensor: &Sensor) -> Self {
        Self {
            id: sensor.id,
            unit_id: sensor.unit_id,
            code: sensor.code.clone(),
            name: sensor.name.clone(),
            config_required: sensor.config_required.clone(),
            default_config: sensor.default_config.clone(),
            created_at: sensor.created_at,
            modified_at: sensor.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponse {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Unit> for UnitResponse {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            symbol: unit.symbol.clone(),
            created_at: unit.created_at,
            modified_at: unit.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&DeviceModel> for ModelResponse {
    fn from(model: &DeviceModel) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            code: model.code.clone(),
            created_at: model.created_at,
            modified_at: model.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: LoginUserInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_request_rejects_bad_email() {
        let req = AccountRequest {
            email: "nope".into(),
            name: "A".into(),
            password: "pw".into(),
            receives_updates: false,
        };
        assert!(matches!(req.validate(), Err(DomainError::BadPayload(_))));
    }

    #[test]
    fn login_request_requires_both_fields() {
        let req = LoginRequest {
            email: "a@x.com".into(),
            password: String::new(),
        };
        assert!(matches!(req.validate(), Err(DomainError::BadPayload(_))));
    }

    #[test]
    fn responses_serialize_camel_case() {
        let account = Account::new("a@x.com", "A", Utc::now());
        let value = serde_json::to_value(AccountResponse::from(&account)).unwrap();
        assert!(value.get("receivesUpdates").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("receives_updates").is_none());
    }
}
