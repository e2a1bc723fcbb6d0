//! Devices and the global reference catalog (sensors, units, models).
//!
//! Devices are account-scoped and follow the same fetch-then-check pattern as
//! the customer resources. Sensors, units and models are shared reference
//! data readable by any authenticated caller.

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::datastore::DataStore;
use crate::dto::DeviceRequest;
use crate::error::DomainError;
use crate::models::{Device, DeviceModel, Sensor, Unit};
use crate::ownership::check_ownership;
use crate::pagination::{PageRequest, PageResult};

#[derive(Clone)]
pub struct DeviceService {
    store: DataStore,
}

impl DeviceService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    // -- devices ------------------------------------------------------------

    pub async fn add_device(
        &self,
        account_id: i64,
        request: &DeviceRequest,
    ) -> Result<Device, DomainError> {
        if let Some(claimed) = request.account_id {
            if claimed != account_id {
                return Err(DomainError::DeviceAccountMismatch);
            }
        }
        // The model must exist before a device may reference it.
        self.fetch_model(request.model_id).await?;

        let now = Utc::now();
        let created = sqlx::query_as::<_, Device>(
            "INSERT INTO devices \
             (account_id, model_id, name, serial_number, model_config, created_at, modified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(account_id)
        .bind(request.model_id)
        .bind(&request.name)
        .bind(&request.serial_number)
        .bind(&request.model_config)
        .bind(now)
        .bind(now)
        .fetch_one(&self.store.writer)
        .await?;
        info!(account_id, device_id = created.id, "device created");
        Ok(created)
    }

    pub async fn fetch_device(
        &self,
        account_id: i64,
        device_id: i64,
    ) -> Result<Device, DomainError> {
        let device =
            sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1 AND active = TRUE")
                .bind(device_id)
                .fetch_optional(&self.store.reader)
                .await?
                .ok_or(DomainError::NotFoundDeviceById)?;
        check_ownership(device.account_id, account_id, DomainError::NotOwnedDeviceById)?;
        Ok(device)
    }

    pub async fn fetch_device_by_serial(
        &self,
        account_id: i64,
        serial_number: &str,
    ) -> Result<Device, DomainError> {
        let device = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE serial_number = $1 AND active = TRUE",
        )
        .bind(serial_number)
        .fetch_optional(&self.store.reader)
        .await?
        .ok_or(DomainError::NotFoundDeviceBySerialNumber)?;
        // Deny with by-serial semantics so a foreign serial reads exactly
        // like an unknown one.
        check_ownership(
            device.account_id,
            account_id,
            DomainError::NotOwnedDeviceBySerialNumber,
        )?;
        Ok(device)
    }

    /// Only the name and the model configuration are mutable; a payload that
    /// tries to move a device to another serial number or model is rejected.
    pub async fn update_device(
        &self,
        account_id: i64,
        device_id: i64,
        request: &DeviceRequest,
    ) -> Result<Device, DomainError> {
        let existing = self.fetch_device(account_id, device_id).await?;
        if request.serial_number != existing.serial_number {
            return Err(DomainError::SerialNumberMismatch);
        }
        if request.model_id != existing.model_id {
            return Err(DomainError::ModelMismatch);
        }
        self.apply_device_update(device_id, &request.name, &request.model_config)
            .await
    }

    async fn apply_device_update(
        &self,
        device_id: i64,
        name: &str,
        model_config: &Value,
    ) -> Result<Device, DomainError> {
        sqlx::query_as::<_, Device>(
            "UPDATE devices SET name = $1, model_config = $2, modified_at = $3 \
             WHERE id = $4 AND active = TRUE RETURNING *",
        )
        .bind(name)
        .bind(model_config)
        .bind(Utc::now())
        .bind(device_id)
        .fetch_optional(&self.store.writer)
        .await?
        .ok_or(DomainError::NotFoundDeviceById)
    }

    pub async fn delete_device(
        &self,
        account_id: i64,
        device_id: i64,
    ) -> Result<(), DomainError> {
        self.fetch_device(account_id, device_id).await?;
        sqlx::query(
            "UPDATE devices SET active = FALSE, modified_at = $1 \
             WHERE id = $2 AND active = TRUE",
        )
        .bind(Utc::now())
        .bind(device_id)
        .execute(&self.store.writer)
        .await?;
        info!(account_id, device_id, "device deactivated");
        Ok(())
    }

    pub async fn list_devices(
        &self,
        account_id: i64,
        page: PageRequest,
    ) -> Result<PageResult<Device>, DomainError> {
        let rows = sqlx::query_as::<_, Device>(
            "SELECT * FROM devices WHERE account_id = $1 AND active = TRUE \
             ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(account_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM devices WHERE account_id = $1 AND active = TRUE",
        )
        .bind(account_id)
        .fetch_one(&self.store.reader)
        .await?;
        Ok(PageResult::new(rows, page, total))
    }

    // -- reference catalog --------------------------------------------------

    pub async fn fetch_sensor(&self, sensor_id: i64) -> Result<Sensor, DomainError> {
        sqlx::query_as::<_, Sensor>("SELECT * FROM sensors WHERE id = $1 AND active = TRUE")
            .bind(sensor_id)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundSensorById)
    }

    pub async fn list_sensors(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<Sensor>, DomainError> {
        let rows = sqlx::query_as::<_, Sensor>(
            "SELECT * FROM sensors WHERE active = TRUE ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensors WHERE active = TRUE")
            .fetch_one(&self.store.reader)
            .await?;
        Ok(PageResult::new(rows, page, total))
    }

    pub async fn fetch_unit(&self, unit_id: i64) -> Result<Unit, DomainError> {
        sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1 AND active = TRUE")
            .bind(unit_id)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundUnitById)
    }

    pub async fn fetch_unit_by_name(&self, name: &str) -> Result<Unit, DomainError> {
        sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE name = $1 AND active = TRUE")
            .bind(name)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundUnitByName)
    }

    pub async fn list_units(&self, page: PageRequest) -> Result<PageResult<Unit>, DomainError> {
        let rows = sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE active = TRUE ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM units WHERE active = TRUE")
            .fetch_one(&self.store.reader)
            .await?;
        Ok(PageResult::new(rows, page, total))
    }

    pub async fn fetch_model(&self, model_id: i64) -> Result<DeviceModel, DomainError> {
        sqlx::query_as::<_, DeviceModel>("SELECT * FROM models WHERE id = $1 AND active = TRUE")
            .bind(model_id)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundModelById)
    }

    pub async fn list_models(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<DeviceModel>, DomainError> {
        let rows = sqlx::query_as::<_, DeviceModel>(
            "SELECT * FROM models WHERE active = TRUE ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM models WHERE active = TRUE")
            .fetch_one(&self.store.reader)
            .await?;
        Ok(PageResult::new(rows, page, total))
    }
}
