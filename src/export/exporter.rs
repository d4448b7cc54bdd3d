use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::common::error::{SchemaError, StoreError};
use crate::store::SchemaStore;

/// Serializes every live schema object into terminated DDL statements.
pub struct SchemaExporter<'a, S: SchemaStore> {
    store: &'a S,
}

impl<'a, S: SchemaStore> SchemaExporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        SchemaExporter { store }
    }

    /// Definitions sorted by object name, then kind.
    pub async fn export_schema(&self) -> Result<Vec<String>, SchemaError> {
        let mut objects = self
            .store
            .list_object_definitions()
            .await
            .map_err(|cause| introspection_failed("schema objects", cause))?;

        objects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.kind.cmp(&b.kind)));

        debug!("Exporting {} schema objects", objects.len());

        Ok(objects
            .iter()
            .map(|object| terminate(&object.definition))
            .collect())
    }

    /// Full export document stamped with the current local time.
    pub async fn export_text(&self) -> Result<String, SchemaError> {
        let definitions = self.export_schema().await?;
        let store_version = self
            .store
            .version()
            .await
            .map_err(|cause| introspection_failed("store version", cause))?;

        Ok(render(&definitions, &store_version, &Local::now()))
    }
}

pub fn render<Tz>(definitions: &[String], store_version: &str, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = format!(
        "-- Schema export generated at {}\n-- {} {}, {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S %z"),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        store_version
    );

    for definition in definitions {
        output.push('\n');
        output.push_str(definition);
        output.push('\n');
    }

    output
}

fn terminate(definition: &str) -> String {
    let definition = definition.trim_end();

    if definition.ends_with(';') {
        definition.to_string()
    } else {
        format!("{};", definition)
    }
}

fn introspection_failed(target: &str, cause: StoreError) -> SchemaError {
    SchemaError::IntrospectionFailed {
        target: target.to_string(),
        cause,
    }
}
