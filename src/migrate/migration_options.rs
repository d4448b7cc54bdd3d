#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    /// Plan and report without altering the database.
    pub dry_run: bool,
    /// Restrict the run to a single declared table.
    pub only_table: Option<String>,
}

impl MigrationOptions {
    pub fn includes(&self, table_name: &str) -> bool {
        self.only_table
            .as_deref()
            .map_or(true, |only| only == table_name)
    }
}
