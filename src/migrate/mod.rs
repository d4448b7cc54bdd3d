pub mod executor;
pub mod migration_options;
pub mod migration_result;
pub mod migrator;
pub mod plan;
pub mod planner;
pub mod report;
pub mod runner;
