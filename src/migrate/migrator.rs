use std::time::Instant;

use crate::common::error::SchemaError;
use crate::common::schema::ColumnSpec;
use crate::inspect::inspector::SchemaInspector;
use crate::migrate::executor::MigrationExecutor;
use crate::migrate::plan::MigrationPlan;
use crate::migrate::planner::DeltaPlanner;
use crate::migrate::report::MigrationReport;
use crate::store::SchemaStore;

/// Target shape for one table, as declared by a migration author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TargetTable {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        TargetTable {
            table_name: table_name.into(),
            columns,
        }
    }
}

/// Drives inspect, plan and execute for a target table against one store.
///
/// Holds no state between runs, so re-running after any partial failure
/// only attempts the columns that are still missing.
pub struct SchemaMigrator<'a, S: SchemaStore> {
    store: &'a S,
}

impl<'a, S: SchemaStore> SchemaMigrator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        SchemaMigrator { store }
    }

    pub async fn plan_only(&self, target: &TargetTable) -> Result<MigrationPlan, SchemaError> {
        let live = SchemaInspector::new(self.store)
            .inspect(&target.table_name)
            .await?;

        for column in target.columns.iter().filter(|c| live.contains(&c.name)) {
            info!("Column {}.{} already present", target.table_name, column.name);
        }

        let plan = DeltaPlanner::plan(&live, &target.columns);

        for (planned, existing) in DeltaPlanner::case_conflicts(&live, &plan) {
            warn!(
                "Column {}.{} exists as {}; SQLite column names are case-insensitive, declare it as {} to converge",
                live.table_name, planned, existing, existing
            );
        }

        debug!(
            "Planned {} operations for table {}: {}",
            plan.len(),
            plan.table_name,
            plan.column_names().join(", ")
        );

        Ok(plan)
    }

    pub async fn migrate(&self, target: &TargetTable) -> Result<MigrationReport, SchemaError> {
        info!("Migrating table: {}", target.table_name);

        let start_time = Instant::now();

        let plan = self.plan_only(target).await?;

        if plan.is_empty() {
            info!("Table {} already has every target column", target.table_name);
        }

        let report = MigrationExecutor::new(self.store).execute(&plan).await?;

        info!(
            "Table {} finished with status {}, took: {}s",
            target.table_name,
            report.status(),
            start_time.elapsed().as_secs_f32()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::StoreError;
    use crate::migrate::report::MigrationStatus;
    use crate::store::fake::FakeStore;

    fn accounts_target() -> TargetTable {
        TargetTable::new(
            "accounts",
            vec![
                ColumnSpec::new("id", "INTEGER"),
                ColumnSpec::new("name", "TEXT"),
                ColumnSpec::new("service_name", "TEXT").with_default("'msgHist'"),
                ColumnSpec::new("api_version", "TEXT").with_default("'1.0'"),
            ],
        )
    }

    fn accounts_store() -> FakeStore {
        FakeStore::new().with_table(
            "accounts",
            vec![ColumnSpec::new("id", "INTEGER"), ColumnSpec::new("name", "TEXT")],
        )
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = accounts_store();
        let migrator = SchemaMigrator::new(&store);

        let first = migrator.migrate(&accounts_target()).await.unwrap();
        assert_eq!(first.status(), MigrationStatus::Complete);
        assert_eq!(first.succeeded(), 2);

        let writes = store.write_attempts();
        let second = migrator.migrate(&accounts_target()).await.unwrap();

        assert_eq!(second.status(), MigrationStatus::NoMigrationNeeded);
        assert_eq!(store.write_attempts(), writes);
    }

    #[tokio::test]
    async fn retries_converge_on_missing_columns_only() {
        let store = accounts_store().fail_column(
            "service_name",
            StoreError::ConstraintViolation("bad default".to_string()),
        );
        let migrator = SchemaMigrator::new(&store);

        let first = migrator.migrate(&accounts_target()).await.unwrap();
        assert_eq!(first.status(), MigrationStatus::Partial);

        let plan = migrator.plan_only(&accounts_target()).await.unwrap();
        assert_eq!(plan.column_names(), vec!["service_name"]);

        store.clear_column_failures();
        let second = migrator.migrate(&accounts_target()).await.unwrap();
        assert_eq!(second.status(), MigrationStatus::Complete);
        assert_eq!(second.planned(), 1);
        assert_eq!(
            store.column_names("accounts"),
            vec!["id", "name", "api_version", "service_name"]
        );
    }

    #[tokio::test]
    async fn mixed_case_table_name_migrates_stored_table() {
        let store = accounts_store();

        let report = SchemaMigrator::new(&store)
            .migrate(&TargetTable::new(
                "ACCOUNTS",
                vec![ColumnSpec::new("email", "TEXT")],
            ))
            .await
            .unwrap();

        assert_eq!(report.table_name(), "accounts");
        assert_eq!(report.status(), MigrationStatus::Complete);
        assert_eq!(store.column_names("accounts"), vec!["id", "name", "email"]);
    }

    #[tokio::test]
    async fn missing_table_aborts_before_writing() {
        let store = FakeStore::new();

        let err = SchemaMigrator::new(&store)
            .migrate(&accounts_target())
            .await
            .unwrap_err();

        assert!(matches!(err, SchemaError::TableNotFound(_)));
        assert_eq!(store.write_attempts(), 0);
    }

    #[tokio::test]
    async fn lost_store_recovers_on_retry() {
        let store = accounts_store().lose_connection_after(1);
        let migrator = SchemaMigrator::new(&store);

        let err = migrator.migrate(&accounts_target()).await.unwrap_err();
        assert_eq!(err.partial_report().map(|r| r.succeeded()), Some(1));

        store.restore_connection();
        let report = migrator.migrate(&accounts_target()).await.unwrap();
        assert_eq!(report.planned(), 1);
        assert_eq!(report.status(), MigrationStatus::Complete);
    }
}
