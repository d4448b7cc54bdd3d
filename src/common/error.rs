use thiserror::Error;

use crate::migrate::report::MigrationReport;

/// Failure reported by a [`SchemaStore`](crate::store::SchemaStore) call, already
/// classified by the store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Table {0} not found")]
    TableNotFound(String),

    #[error("Failed to introspect {target}")]
    IntrospectionFailed {
        target: String,
        #[source]
        cause: StoreError,
    },

    #[error("Store became unavailable while migrating table {table}")]
    StoreUnavailable {
        table: String,
        #[source]
        cause: StoreError,
        partial: Box<MigrationReport>,
    },
}

impl SchemaError {
    /// Results gathered before the store was lost, if any.
    pub fn partial_report(&self) -> Option<&MigrationReport> {
        match self {
            SchemaError::StoreUnavailable { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
