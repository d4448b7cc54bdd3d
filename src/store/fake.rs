use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::common::error::StoreError;
use crate::common::schema::{ColumnSpec, ObjectDefinition};
use crate::store::SchemaStore;

/// Scripted in-memory store for exercising failure paths the real engine
/// cannot produce on demand.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    tables: Vec<(String, Vec<ColumnSpec>)>,
    objects: Vec<ObjectDefinition>,
    column_failures: HashMap<String, StoreError>,
    introspection_failure: Option<StoreError>,
    lose_connection_after: Option<usize>,
    successful_writes: usize,
    write_attempts: usize,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore::default()
    }

    pub fn with_table(self, table: &str, columns: Vec<ColumnSpec>) -> Self {
        self.state
            .lock()
            .unwrap()
            .tables
            .push((table.to_string(), columns));
        self
    }

    pub fn with_object(self, name: &str, kind: &str, definition: &str) -> Self {
        self.state.lock().unwrap().objects.push(ObjectDefinition {
            name: name.to_string(),
            kind: kind.to_string(),
            definition: definition.to_string(),
        });
        self
    }

    /// Every attempt to add `column` fails with `err`.
    pub fn fail_column(self, column: &str, err: StoreError) -> Self {
        self.state
            .lock()
            .unwrap()
            .column_failures
            .insert(column.to_string(), err);
        self
    }

    pub fn fail_introspection(self, err: StoreError) -> Self {
        self.state.lock().unwrap().introspection_failure = Some(err);
        self
    }

    /// After `writes` successful additions every call reports the store as gone.
    pub fn lose_connection_after(self, writes: usize) -> Self {
        self.state.lock().unwrap().lose_connection_after = Some(writes);
        self
    }

    pub fn restore_connection(&self) {
        self.state.lock().unwrap().lose_connection_after = None;
    }

    pub fn clear_column_failures(&self) {
        self.state.lock().unwrap().column_failures.clear();
    }

    pub fn write_attempts(&self) -> usize {
        self.state.lock().unwrap().write_attempts
    }

    pub fn column_names(&self, table: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }
}

impl FakeState {
    fn connection_lost(&self) -> bool {
        self.lose_connection_after
            .map_or(false, |limit| self.successful_writes >= limit)
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.connection_lost() {
            return Err(StoreError::Unavailable("connection lost".to_string()));
        }
        match &self.introspection_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SchemaStore for FakeStore {
    async fn resolve_table(&self, table: &str) -> Result<Option<String>, StoreError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;
        Ok(state
            .tables
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(table))
            .map(|(name, _)| name.clone()))
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnSpec>, StoreError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;
        Ok(state
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.clone())
            .unwrap_or_default())
    }

    async fn add_column(&self, table: &str, column: &ColumnSpec) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.write_attempts += 1;

        if state.connection_lost() {
            return Err(StoreError::Unavailable("connection lost".to_string()));
        }
        if let Some(err) = state.column_failures.get(&column.name) {
            return Err(err.clone());
        }

        let columns = state
            .tables
            .iter_mut()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns)
            .ok_or_else(|| StoreError::Other(format!("no such table: {}", table)))?;

        if columns.iter().any(|c| c.name.eq_ignore_ascii_case(&column.name)) {
            return Err(StoreError::DuplicateColumn(format!(
                "duplicate column name: {}",
                column.name
            )));
        }

        columns.push(column.clone());
        state.successful_writes += 1;
        Ok(())
    }

    async fn list_object_definitions(&self) -> Result<Vec<ObjectDefinition>, StoreError> {
        let state = self.state.lock().unwrap();
        state.check_reads()?;
        Ok(state.objects.clone())
    }

    async fn version(&self) -> Result<String, StoreError> {
        Ok("FakeStore 1.0".to_string())
    }
}
