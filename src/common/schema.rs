use std::collections::HashSet;
use std::fmt;

/// Declarative description of a column that must exist on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: String,
    /// Raw SQL literal, e.g. `'msgHist'` or `0`.
    pub default_literal: Option<String>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        ColumnSpec {
            name: name.into(),
            sql_type: sql_type.into(),
            default_literal: None,
        }
    }

    pub fn with_default(mut self, default_literal: impl Into<String>) -> Self {
        self.default_literal = Some(default_literal.into());
        self
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if !self.sql_type.is_empty() {
            write!(f, " {}", self.sql_type)?;
        }

        if let Some(default_literal) = &self.default_literal {
            write!(f, " DEFAULT {}", default_literal)?;
        }

        Ok(())
    }
}

/// Live, introspected state of a table. Built fresh on every inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        TableSchema {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Exact, case-sensitive column names.
    pub fn column_names(&self) -> HashSet<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn contains(&self, column_name: &str) -> bool {
        self.columns.iter().any(|column| column.name == column_name)
    }
}

/// One schema object as stored by the database engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDefinition {
    pub name: String,
    pub kind: String,
    pub definition: String,
}
