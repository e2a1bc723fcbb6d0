//! Reader/writer connection pool pair.
//!
//! Both pools are created once at startup and shared by every handler. Reads
//! go to the reader pool, mutations to the writer pool; with a single
//! database both URLs point at the same server. Each session carries a
//! server-side `statement_timeout` so no single statement can outlive its
//! deadline.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct DataStore {
    pub reader: PgPool,
    pub writer: PgPool,
}

impl DataStore {
    /// Connect both pools eagerly, verifying connectivity.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let writer = Self::pool_options(config)
            .connect_with(Self::connect_options(&config.writer_url, config)?)
            .await?;
        let reader = Self::pool_options(config)
            .connect_with(Self::connect_options(&config.reader_url, config)?)
            .await?;
        info!("connected reader and writer database pools");
        Ok(Self { reader, writer })
    }

    /// Build both pools without touching the network. Connections are
    /// established on first use; handy for tests that never reach storage.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let writer = Self::pool_options(config)
            .connect_lazy_with(Self::connect_options(&config.writer_url, config)?);
        let reader = Self::pool_options(config)
            .connect_lazy_with(Self::connect_options(&config.reader_url, config)?);
        Ok(Self { reader, writer })
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
    }

    fn connect_options(
        url: &str,
        config: &DatabaseConfig,
    ) -> Result<PgConnectOptions, sqlx::Error> {
        let options = url.parse::<PgConnectOptions>()?;
        Ok(options.options([(
            "statement_timeout",
            config.statement_timeout_ms.to_string(),
        )]))
    }

    /// Liveness probe across both pools.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.reader).await?;
        sqlx::query("SELECT 1").execute(&self.writer).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
        info!("closed database pools");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn lazy_pools_build_without_a_server() {
        let config = AppConfig::from_env();
        let store = DataStore::connect_lazy(&config.database).expect("lazy pools");
        assert!(!store.reader.is_closed());
        assert!(!store.writer.is_closed());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let mut config = AppConfig::from_env().database;
        config.writer_url = "not a url".into();
        assert!(DataStore::connect_lazy(&config).is_err());
    }
}
