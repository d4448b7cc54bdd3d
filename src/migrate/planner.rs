use std::collections::HashSet;

use crate::common::schema::{ColumnSpec, TableSchema};
use crate::migrate::plan::{AddColumnOp, MigrationPlan};

pub struct DeltaPlanner;

impl DeltaPlanner {
    /// Computes the additive operations that bring `live` up to `target`.
    ///
    /// Pure: the same inputs always give the same plan. Names are compared
    /// exactly and a name repeated in `target` is planned once.
    pub fn plan(live: &TableSchema, target: &[ColumnSpec]) -> MigrationPlan {
        let live_names = live.column_names();
        let mut planned_names = HashSet::new();
        let mut operations = Vec::new();

        for column in target {
            if live_names.contains(column.name.as_str()) {
                continue;
            }

            if planned_names.insert(column.name.as_str()) {
                operations.push(AddColumnOp {
                    column: column.clone(),
                });
            }
        }

        MigrationPlan {
            table_name: live.table_name.clone(),
            operations,
        }
    }

    /// Planned columns whose name matches a live column only when case is
    /// ignored, paired with that live name. SQLite rejects these as duplicates.
    pub fn case_conflicts<'p>(
        live: &'p TableSchema,
        plan: &'p MigrationPlan,
    ) -> Vec<(&'p str, &'p str)> {
        plan.operations
            .iter()
            .filter_map(|operation| {
                let planned = operation.column.name.as_str();
                live.columns
                    .iter()
                    .find(|column| column.name.eq_ignore_ascii_case(planned))
                    .map(|column| (planned, column.name.as_str()))
            })
            .collect()
    }
}
