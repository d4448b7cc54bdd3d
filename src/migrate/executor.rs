use std::time::Instant;

use crate::common::error::{SchemaError, StoreError};
use crate::migrate::migration_result::{OperationFailure, OperationResult};
use crate::migrate::plan::MigrationPlan;
use crate::migrate::report::MigrationReport;
use crate::store::SchemaStore;

/// Applies a plan one operation at a time, in plan order.
///
/// A failed operation never prevents the remaining ones from being attempted.
/// If the store is still unreachable when the batch ends, the report of every
/// attempted operation is returned inside [`SchemaError::StoreUnavailable`].
pub struct MigrationExecutor<'a, S: SchemaStore> {
    store: &'a S,
}

impl<'a, S: SchemaStore> MigrationExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        MigrationExecutor { store }
    }

    pub async fn execute(&self, plan: &MigrationPlan) -> Result<MigrationReport, SchemaError> {
        let table_name = plan.table_name.as_str();
        let mut results = Vec::with_capacity(plan.len());

        // First error of the trailing run of unavailable failures
        let mut connection_lost: Option<StoreError> = None;

        for operation in &plan.operations {
            let start_time = Instant::now();
            let column_name = operation.column.name.as_str();

            match self.store.add_column(table_name, &operation.column).await {
                Ok(()) => {
                    info!(
                        "Added column {}.{} ({}), took: {}s",
                        table_name,
                        column_name,
                        operation.column,
                        start_time.elapsed().as_secs_f32()
                    );
                    connection_lost = None;
                    results.push(OperationResult::success(operation.clone()));
                }
                Err(err) => {
                    if err.is_unavailable() {
                        connection_lost.get_or_insert_with(|| err.clone());
                    } else {
                        connection_lost = None;
                    }

                    let failure = OperationFailure::from(err);
                    match &failure {
                        OperationFailure::DuplicateColumn => {
                            warn!("Column {}.{} already present", table_name, column_name)
                        }
                        other => error!(
                            "Failed to add column {}.{}: {}",
                            table_name, column_name, other
                        ),
                    }

                    results.push(OperationResult::failure(operation.clone(), failure));
                }
            }
        }

        let report = MigrationReport::summarize(table_name, results);

        match connection_lost {
            Some(cause) => Err(SchemaError::StoreUnavailable {
                table: table_name.to_string(),
                cause,
                partial: Box::new(report),
            }),
            None => Ok(report),
        }
    }
}
