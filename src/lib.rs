#[macro_use]
extern crate log;

pub mod common;
pub mod config;
pub mod connection;
pub mod export;
pub mod inspect;
pub mod migrate;
pub mod store;
pub mod targets;

pub use common::error::{SchemaError, StoreError};
pub use common::schema::{ColumnSpec, ObjectDefinition, TableSchema};
pub use export::exporter::SchemaExporter;
pub use inspect::inspector::SchemaInspector;
pub use migrate::executor::MigrationExecutor;
pub use migrate::migrator::{SchemaMigrator, TargetTable};
pub use migrate::plan::{AddColumnOp, MigrationPlan};
pub use migrate::planner::DeltaPlanner;
pub use migrate::report::{MigrationReport, MigrationStatus};
pub use store::SchemaStore;
