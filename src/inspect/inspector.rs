use crate::common::error::{SchemaError, StoreError};
use crate::common::schema::TableSchema;
use crate::store::SchemaStore;

/// Reads the live column set of a table. Never writes.
pub struct SchemaInspector<'a, S: SchemaStore> {
    store: &'a S,
}

impl<'a, S: SchemaStore> SchemaInspector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        SchemaInspector { store }
    }

    pub async fn inspect(&self, table_name: &str) -> Result<TableSchema, SchemaError> {
        let stored_name = self
            .store
            .resolve_table(table_name)
            .await
            .map_err(|cause| introspection_failed(table_name, cause))?
            .ok_or_else(|| SchemaError::TableNotFound(table_name.to_string()))?;

        if stored_name != table_name {
            debug!("Table {} is stored as {}", table_name, stored_name);
        }

        let columns = self
            .store
            .list_columns(&stored_name)
            .await
            .map_err(|cause| introspection_failed(&stored_name, cause))?;

        debug!(
            "Table {} has {} live columns: {}",
            stored_name,
            columns.len(),
            columns
                .iter()
                .map(|column| column.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(TableSchema::new(stored_name, columns))
    }
}

fn introspection_failed(table_name: &str, cause: StoreError) -> SchemaError {
    SchemaError::IntrospectionFailed {
        target: format!("table {}", table_name),
        cause,
    }
}
