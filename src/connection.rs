use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;

use crate::config::DatabaseConfig;
use crate::store::sqlite::SqliteStore;

pub struct SqliteSchemaConnection {
    pub pool: SqlitePool,
}

impl SqliteSchemaConnection {
    pub fn into_store(self) -> SqliteStore {
        SqliteStore::new(self.pool)
    }
}

#[async_trait]
pub trait DatabaseConnection: Sized {
    async fn new(config: &DatabaseConfig) -> Result<Self>;
}

#[async_trait]
impl DatabaseConnection for SqliteSchemaConnection {
    async fn new(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(config.create_if_missing)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .disable_statement_logging()
            .clone();

        // One invocation owns exactly one connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", config.path.display()))?;

        Ok(SqliteSchemaConnection { pool })
    }
}

pub struct DatabaseConnectionFactory<C: DatabaseConnection> {
    config: DatabaseConfig,
    connection_type: std::marker::PhantomData<C>,
}

impl<C: DatabaseConnection> DatabaseConnectionFactory<C> {
    pub fn new(config: DatabaseConfig) -> Self {
        DatabaseConnectionFactory {
            config,
            connection_type: std::marker::PhantomData,
        }
    }

    pub async fn create_connection(&self) -> Result<C> {
        C::new(&self.config).await
    }
}
