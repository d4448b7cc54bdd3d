use std::fmt;

use crate::common::error::StoreError;
use crate::migrate::plan::AddColumnOp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationFailure {
    /// The column appeared after planning. Benign.
    DuplicateColumn,
    ConstraintViolation(String),
    StoreUnavailable(String),
    Unknown(String),
}

impl From<StoreError> for OperationFailure {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateColumn(_) => OperationFailure::DuplicateColumn,
            StoreError::ConstraintViolation(reason) => OperationFailure::ConstraintViolation(reason),
            StoreError::Unavailable(reason) => OperationFailure::StoreUnavailable(reason),
            StoreError::Other(reason) => OperationFailure::Unknown(reason),
        }
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationFailure::DuplicateColumn => write!(f, "column already exists"),
            OperationFailure::ConstraintViolation(reason) => {
                write!(f, "constraint violation: {}", reason)
            }
            OperationFailure::StoreUnavailable(reason) => write!(f, "store unavailable: {}", reason),
            OperationFailure::Unknown(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Success,
    Failure(OperationFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub operation: AddColumnOp,
    pub outcome: OperationOutcome,
}

impl OperationResult {
    pub fn success(operation: AddColumnOp) -> Self {
        OperationResult {
            operation,
            outcome: OperationOutcome::Success,
        }
    }

    pub fn failure(operation: AddColumnOp, failure: OperationFailure) -> Self {
        OperationResult {
            operation,
            outcome: OperationOutcome::Failure(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == OperationOutcome::Success
    }

    pub fn failure_reason(&self) -> Option<&OperationFailure> {
        match &self.outcome {
            OperationOutcome::Success => None,
            OperationOutcome::Failure(failure) => Some(failure),
        }
    }

    pub fn column_name(&self) -> &str {
        &self.operation.column.name
    }

    /// Human-readable outcome for operators.
    pub fn summary_line(&self) -> String {
        match &self.outcome {
            OperationOutcome::Success => format!("added column {}", self.column_name()),
            OperationOutcome::Failure(OperationFailure::DuplicateColumn) => {
                format!("column {} already present", self.column_name())
            }
            OperationOutcome::Failure(failure) => {
                format!("failed to add column {}: {}", self.column_name(), failure)
            }
        }
    }
}
