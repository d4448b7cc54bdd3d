use crate::common::helpers::quote_identifier;
use crate::common::schema::ColumnSpec;

// SQLite resolves table names case-insensitively
pub const RESOLVE_TABLE_QUERY: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? COLLATE NOCASE";

// hidden: 0 ordinary, 1 virtual-table hidden, 2 and 3 generated
pub const LIST_COLUMNS_QUERY: &str = "SELECT name, type, dflt_value FROM pragma_table_xinfo(?) \
     WHERE hidden IN (0, 2, 3) ORDER BY cid";

pub const LIST_OBJECTS_QUERY: &str = "SELECT name, type, sql FROM sqlite_master \
     WHERE sql IS NOT NULL AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name, type";

pub const VERSION_QUERY: &str = "SELECT sqlite_version()";

pub fn build_add_column_statement(table_name: &str, column: &ColumnSpec) -> String {
    let mut statement = format!(
        "ALTER TABLE {} ADD COLUMN {}",
        quote_identifier(table_name),
        quote_identifier(&column.name)
    );

    let sql_type = column.sql_type.trim();
    if !sql_type.is_empty() {
        statement.push(' ');
        statement.push_str(sql_type);
    }

    if let Some(default_literal) = &column.default_literal {
        statement.push_str(" DEFAULT ");
        statement.push_str(default_literal);
    }

    statement
}
