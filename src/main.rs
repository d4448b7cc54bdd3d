#[macro_use]
extern crate log;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::{fs, io, thread};

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::Env;
use structopt::StructOpt;
use toml::Value;

use db_evolver::common::helpers::print_error_chain;
use db_evolver::config::{Config, DatabaseConfig};
use db_evolver::connection::{DatabaseConnectionFactory, SqliteSchemaConnection};
use db_evolver::export::exporter::SchemaExporter;
use db_evolver::migrate::migration_options::MigrationOptions;
use db_evolver::migrate::report::MigrationReport;
use db_evolver::migrate::runner::{self, TableOutcome};
use db_evolver::store::sqlite::SqliteStore;
use db_evolver::targets::MigrationTargets;

use crate::args::{Args, Command};

mod args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match init().await.with_context(|| "Run failed") {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(errors) => {
            for (index, error) in errors.chain().enumerate() {
                error!("└> {} - {}", index, error);
            }
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every requested migration ended complete or as a no-op.
async fn init() -> Result<bool> {
    let options = Args::from_args();

    initialize_logger(options.verbose, options.quiet);

    let config = load_config(&options.config).context("Failed to load config file")?;

    info!("Opening database {}", config.database().path.display());

    let store = create_store(config.database()).await?;

    match options.command {
        Command::Migrate {
            migrations,
            dry_run,
            table,
        } => {
            let targets =
                load_targets(&migrations).context("Failed to load migrations file")?;

            debug!("Total migrations loaded: {}", targets.len());

            let migration_options = MigrationOptions {
                dry_run,
                only_table: table,
            };

            run_migrations(&store, &targets, &migration_options).await
        }
        Command::Export { output } => {
            let output = output.or_else(|| config.settings().export_path.clone());

            run_export(&store, output.as_deref()).await?;

            Ok(true)
        }
    }
}

async fn create_store(config: &DatabaseConfig) -> Result<SqliteStore> {
    let factory = DatabaseConnectionFactory::<SqliteSchemaConnection>::new(config.clone());
    let connection = factory.create_connection().await?;
    Ok(connection.into_store())
}

async fn run_migrations(
    store: &SqliteStore,
    targets: &MigrationTargets,
    options: &MigrationOptions,
) -> Result<bool> {
    let outcomes = runner::run_migrations(store, targets, options).await?;
    let all_succeeded = outcomes.iter().all(TableOutcome::is_success);

    for outcome in outcomes {
        match outcome {
            TableOutcome::Planned(plan) if plan.is_empty() => {
                info!("Table {}: no migration needed", plan.table_name)
            }
            TableOutcome::Planned(plan) => {
                for operation in &plan.operations {
                    info!("Would add column {}.{}", plan.table_name, operation.column);
                }
            }
            TableOutcome::Migrated(report) => log_report(&report),
            TableOutcome::Failed { table_name, error } => {
                if let Some(partial) = error.partial_report() {
                    log_report(partial);
                }
                print_error_chain(&anyhow::Error::new(error).context(format!(
                    "Error while migrating table: {}",
                    table_name
                )));
            }
        }
    }

    Ok(all_succeeded)
}

fn log_report(report: &MigrationReport) {
    let success = report.status().is_success();

    for result in report.results() {
        if result.is_success() {
            info!("Table {}: {}", report.table_name(), result.summary_line());
        } else {
            warn!("Table {}: {}", report.table_name(), result.summary_line());
        }
    }

    if success {
        info!("{}", report.status_line());
    } else {
        warn!("{}", report.status_line());
    }
}

async fn run_export(store: &SqliteStore, output: Option<&Path>) -> Result<()> {
    let text = SchemaExporter::new(store)
        .export_text()
        .await
        .context("Schema export failed")?;

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            info!("Schema exported to {}", path.display());
        }
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write schema to stdout")?,
    }

    Ok(())
}

fn initialize_logger(verbose: bool, quiet: bool) {
    // RUST_LOG still takes precedence over the flags
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .filter_module("sqlx", log::LevelFilter::Error)
        .format(|buf, record| {
            let timestamp = Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "{} {:<5} [{}] - {}",
                timestamp,
                record.level(),
                thread::current().name().unwrap_or("<unnamed>"),
                record.args()
            )
        })
        .init();
}

fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value = content.parse::<Value>()?;
    let config = Config::from_toml(value)?;
    Ok(config)
}

fn load_targets(path: &Path) -> Result<MigrationTargets> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value = content.parse::<Value>()?;
    let targets = MigrationTargets::from_toml(value)?;
    Ok(targets)
}
