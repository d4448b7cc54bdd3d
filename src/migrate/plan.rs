use std::fmt;

use crate::common::schema::ColumnSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnOp {
    pub column: ColumnSpec,
}

impl fmt::Display for AddColumnOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AddColumn({})", self.column)
    }
}

/// Ordered additive operations for one table, in target declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    pub table_name: String,
    pub operations: Vec<AddColumnOp>,
}

impl MigrationPlan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.operations
            .iter()
            .map(|operation| operation.column.name.as_str())
            .collect()
    }
}
