use std::fmt;

use crate::migrate::migration_result::OperationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    NoMigrationNeeded,
    Complete,
    Partial,
}

impl MigrationStatus {
    /// Whether the invoking process should exit with a zero status.
    pub fn is_success(&self) -> bool {
        !matches!(self, MigrationStatus::Partial)
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MigrationStatus::NoMigrationNeeded => write!(f, "no migration needed"),
            MigrationStatus::Complete => write!(f, "complete"),
            MigrationStatus::Partial => write!(f, "partial"),
        }
    }
}

/// Terminal outcome of one migration. Immutable once summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    table_name: String,
    planned: usize,
    succeeded: usize,
    results: Vec<OperationResult>,
    failed: Vec<OperationResult>,
}

impl MigrationReport {
    pub fn summarize(table_name: &str, results: Vec<OperationResult>) -> Self {
        let failed: Vec<OperationResult> = results
            .iter()
            .filter(|result| !result.is_success())
            .cloned()
            .collect();

        MigrationReport {
            table_name: table_name.to_string(),
            planned: results.len(),
            succeeded: results.len() - failed.len(),
            results,
            failed,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn planned(&self) -> usize {
        self.planned
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> &[OperationResult] {
        &self.failed
    }

    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    pub fn status(&self) -> MigrationStatus {
        if self.planned == 0 {
            MigrationStatus::NoMigrationNeeded
        } else if self.failed.is_empty() {
            MigrationStatus::Complete
        } else {
            MigrationStatus::Partial
        }
    }

    pub fn status_line(&self) -> String {
        match self.status() {
            MigrationStatus::NoMigrationNeeded => {
                format!("Table {}: no migration needed", self.table_name)
            }
            MigrationStatus::Complete => format!(
                "Table {}: migration complete, {} of {} columns added",
                self.table_name, self.succeeded, self.planned
            ),
            MigrationStatus::Partial => format!(
                "Table {}: migration partial, {} of {} columns added, {} failed",
                self.table_name,
                self.succeeded,
                self.planned,
                self.failed.len()
            ),
        }
    }

    /// One line per operation followed by the status line.
    pub fn summary_lines(&self) -> Vec<String> {
        self.results
            .iter()
            .map(OperationResult::summary_line)
            .chain(std::iter::once(self.status_line()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::schema::ColumnSpec;
    use crate::migrate::migration_result::OperationFailure;
    use crate::migrate::plan::AddColumnOp;

    fn op(name: &str) -> AddColumnOp {
        AddColumnOp {
            column: ColumnSpec::new(name, "TEXT"),
        }
    }

    #[test]
    fn empty_results_mean_no_migration_needed() {
        let report = MigrationReport::summarize("accounts", vec![]);

        assert_eq!(report.planned(), 0);
        assert_eq!(report.status(), MigrationStatus::NoMigrationNeeded);
        assert!(report.status().is_success());
        assert_eq!(
            report.summary_lines(),
            vec!["Table accounts: no migration needed".to_string()]
        );
    }

    #[test]
    fn all_successes_are_complete() {
        let report = MigrationReport::summarize(
            "accounts",
            vec![
                OperationResult::success(op("service_name")),
                OperationResult::success(op("api_version")),
            ],
        );

        assert_eq!(report.status(), MigrationStatus::Complete);
        assert_eq!(report.succeeded(), 2);
        assert!(report.failed().is_empty());
        assert_eq!(
            report.summary_lines(),
            vec![
                "added column service_name".to_string(),
                "added column api_version".to_string(),
                "Table accounts: migration complete, 2 of 2 columns added".to_string(),
            ]
        );
    }

    #[test]
    fn any_failure_is_partial_and_enumerated() {
        let report = MigrationReport::summarize(
            "accounts",
            vec![
                OperationResult::failure(
                    op("a"),
                    OperationFailure::ConstraintViolation("bad default".to_string()),
                ),
                OperationResult::success(op("b")),
                OperationResult::failure(op("c"), OperationFailure::DuplicateColumn),
            ],
        );

        assert_eq!(report.status(), MigrationStatus::Partial);
        assert!(!report.status().is_success());
        assert_eq!(report.planned(), 3);
        assert_eq!(report.succeeded(), 1);
        let failed: Vec<_> = report.failed().iter().map(|r| r.column_name()).collect();
        assert_eq!(failed, vec!["a", "c"]);

        let lines = report.summary_lines();
        assert_eq!(
            lines[0],
            "failed to add column a: constraint violation: bad default"
        );
        assert_eq!(lines[2], "column c already present");
        assert_eq!(
            lines[3],
            "Table accounts: migration partial, 1 of 3 columns added, 2 failed"
        );
    }
}
