use anyhow::{anyhow, Context, Result};
use toml::Value;

use crate::common::schema::ColumnSpec;
use crate::migrate::migrator::TargetTable;

/// Migration definitions in declaration order.
#[derive(Debug, Clone)]
pub struct MigrationTargets {
    targets: Vec<TargetTable>,
}

impl MigrationTargets {
    pub fn new(targets: Vec<TargetTable>) -> Self {
        MigrationTargets { targets }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetTable> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn from_toml(value: Value) -> Result<MigrationTargets> {
        let migrations = value
            .get("migrations")
            .ok_or_else(|| anyhow!("Missing migrations table"))?
            .as_array()
            .ok_or_else(|| anyhow!("Invalid migrations table format"))?;

        let targets = migrations
            .iter()
            .enumerate()
            .map(|(index, migration)| {
                parse_target(migration).with_context(|| format!("Invalid migration #{}", index + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MigrationTargets { targets })
    }
}

fn parse_target(migration: &Value) -> Result<TargetTable> {
    let table_name = migration
        .get("table")
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow!("Missing or invalid 'table' field"))?
        .to_string();

    let columns = migration
        .get("columns")
        .and_then(|value| value.as_array())
        .ok_or_else(|| anyhow!("Missing or invalid 'columns' for table {}", table_name))?
        .iter()
        .map(parse_column)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Invalid column in table {}", table_name))?;

    Ok(TargetTable::new(table_name, columns))
}

fn parse_column(column: &Value) -> Result<ColumnSpec> {
    let column = column
        .as_table()
        .ok_or_else(|| anyhow!("Invalid column format"))?;

    let name = column
        .get("name")
        .and_then(|value| value.as_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("Missing or invalid 'name' field"))?;

    let sql_type = column
        .get("type")
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow!("Missing or invalid 'type' field for column {}", name))?;

    let default_literal = match column.get("default") {
        Some(value) => Some(literal_from_value(value).ok_or_else(|| {
            anyhow!("Invalid 'default' field for column {}", name)
        })?),
        None => None,
    };

    Ok(ColumnSpec {
        name: name.to_string(),
        sql_type: sql_type.to_string(),
        default_literal,
    })
}

// Strings are raw SQL literals, numbers and booleans are written out as-is
fn literal_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(literal) => Some(literal.clone()),
        Value::Integer(number) => Some(number.to_string()),
        // Debug keeps the fractional part, so 1.0 stays 1.0
        Value::Float(number) if number.is_finite() => Some(format!("{:?}", number)),
        Value::Boolean(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        _ => None,
    }
}
