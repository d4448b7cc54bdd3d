use async_trait::async_trait;
use futures::{future, TryStreamExt};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::common::error::StoreError;
use crate::common::schema::{ColumnSpec, ObjectDefinition};
use crate::store::query::{
    build_add_column_statement, LIST_COLUMNS_QUERY, LIST_OBJECTS_QUERY, RESOLVE_TABLE_QUERY,
    VERSION_QUERY,
};
use crate::store::SchemaStore;

// Primary SQLite result codes
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_CONSTRAINT: i32 = 19;
const SQLITE_NOTADB: i32 = 26;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }
}

#[async_trait]
impl SchemaStore for SqliteStore {
    async fn resolve_table(&self, table: &str) -> Result<Option<String>, StoreError> {
        let stored_name: Option<String> = sqlx::query_scalar(RESOLVE_TABLE_QUERY)
            .bind(table)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stored_name)
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnSpec>, StoreError> {
        let rows = sqlx::query(LIST_COLUMNS_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(column_from_row).collect()
    }

    async fn add_column(&self, table: &str, column: &ColumnSpec) -> Result<(), StoreError> {
        let statement = build_add_column_statement(table, column);

        debug!("Executing: {}", statement);

        sqlx::query(&statement).execute(&self.pool).await?;

        Ok(())
    }

    async fn list_object_definitions(&self) -> Result<Vec<ObjectDefinition>, StoreError> {
        let definitions = sqlx::query(LIST_OBJECTS_QUERY)
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .and_then(|row| future::ready(object_definition_from_row(&row)))
            .try_collect::<Vec<_>>()
            .await?;

        Ok(definitions)
    }

    async fn version(&self) -> Result<String, StoreError> {
        let version: String = sqlx::query_scalar(VERSION_QUERY)
            .fetch_one(&self.pool)
            .await?;

        Ok(format!("SQLite {}", version))
    }
}

fn column_from_row(row: &SqliteRow) -> Result<ColumnSpec, StoreError> {
    Ok(ColumnSpec {
        name: row.try_get::<String, _>("name")?,
        sql_type: row.try_get::<String, _>("type")?,
        default_literal: row.try_get::<Option<String>, _>("dflt_value")?,
    })
}

fn object_definition_from_row(row: &SqliteRow) -> Result<ObjectDefinition, StoreError> {
    Ok(ObjectDefinition {
        name: row.try_get::<String, _>("name")?,
        kind: row.try_get::<String, _>("type")?,
        definition: row.try_get::<String, _>("sql")?,
    })
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                classify_database_error(db_err.message(), db_err.code().as_deref())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Other(err.to_string()),
        }
    }
}

/// Maps an SQLite error message and (extended) result code onto the store taxonomy.
pub fn classify_database_error(message: &str, code: Option<&str>) -> StoreError {
    let primary_code = code
        .and_then(|code| code.parse::<i32>().ok())
        .map(|code| code & 0xff);

    if message.starts_with("duplicate column name") {
        return StoreError::DuplicateColumn(message.to_string());
    }

    // ALTER TABLE ... ADD COLUMN rejections all start with "Cannot add a"
    if primary_code == Some(SQLITE_CONSTRAINT) || message.starts_with("Cannot add a") {
        return StoreError::ConstraintViolation(message.to_string());
    }

    match primary_code {
        Some(SQLITE_IOERR | SQLITE_CORRUPT | SQLITE_CANTOPEN | SQLITE_NOTADB) => {
            StoreError::Unavailable(message.to_string())
        }
        _ => StoreError::Other(message.to_string()),
    }
}
