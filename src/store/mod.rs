use async_trait::async_trait;

use crate::common::error::StoreError;
use crate::common::schema::{ColumnSpec, ObjectDefinition};

#[cfg(test)]
pub mod fake;
pub mod query;
pub mod sqlite;

/// Structural capabilities the engine needs from the database.
///
/// Every call is a single statement against the store and is awaited before
/// the next one is issued.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Name under which `table` is stored, or `None` if there is no such table.
    async fn resolve_table(&self, table: &str) -> Result<Option<String>, StoreError>;

    /// Columns of `table` in declaration order, generated columns included.
    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnSpec>, StoreError>;

    async fn add_column(&self, table: &str, column: &ColumnSpec) -> Result<(), StoreError>;

    async fn list_object_definitions(&self) -> Result<Vec<ObjectDefinition>, StoreError>;

    /// Engine name and version, e.g. `SQLite 3.41.2`.
    async fn version(&self) -> Result<String, StoreError>;
}
