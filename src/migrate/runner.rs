use anyhow::{bail, Result};

use crate::common::error::SchemaError;
use crate::migrate::migration_options::MigrationOptions;
use crate::migrate::migrator::{SchemaMigrator, TargetTable};
use crate::migrate::plan::MigrationPlan;
use crate::migrate::report::MigrationReport;
use crate::store::SchemaStore;
use crate::targets::MigrationTargets;

/// What happened to one declared table during a run.
#[derive(Debug)]
pub enum TableOutcome {
    /// Dry run: the plan that would have been executed.
    Planned(MigrationPlan),
    Migrated(MigrationReport),
    Failed {
        table_name: String,
        error: SchemaError,
    },
}

impl TableOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            TableOutcome::Planned(_) => true,
            TableOutcome::Migrated(report) => report.status().is_success(),
            TableOutcome::Failed { .. } => false,
        }
    }
}

/// Declared targets the options select, in declaration order.
pub fn select_targets<'t>(
    targets: &'t MigrationTargets,
    options: &MigrationOptions,
) -> Result<Vec<&'t TargetTable>> {
    let selected: Vec<&TargetTable> = targets
        .iter()
        .filter(|target| options.includes(&target.table_name))
        .collect();

    if selected.is_empty() {
        match &options.only_table {
            Some(table) => bail!("No migration declared for table {}", table),
            None => bail!("No migrations declared"),
        }
    }

    Ok(selected)
}

/// Runs every selected target in order. A failing table never stops the
/// ones after it; a dry run only inspects and plans.
pub async fn run_migrations<S: SchemaStore>(
    store: &S,
    targets: &MigrationTargets,
    options: &MigrationOptions,
) -> Result<Vec<TableOutcome>> {
    let selected = select_targets(targets, options)?;
    let migrator = SchemaMigrator::new(store);
    let mut outcomes = Vec::with_capacity(selected.len());

    for target in selected {
        let outcome = if options.dry_run {
            migrator.plan_only(target).await.map(TableOutcome::Planned)
        } else {
            migrator.migrate(target).await.map(TableOutcome::Migrated)
        };

        outcomes.push(outcome.unwrap_or_else(|error| TableOutcome::Failed {
            table_name: target.table_name.clone(),
            error,
        }));
    }

    Ok(outcomes)
}
