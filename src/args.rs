use std::path::PathBuf;

use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
name = "db-evolve",
version = env ! ("CARGO_PKG_VERSION"),
about = "Additive, re-runnable schema migrations for SQLite databases.\n\nInspects live tables, adds the declared columns that are missing and reports every change.",
setting = AppSettings::ColoredHelp,
)]
pub struct Args {
    /// Activate verbose mode
    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,

    /// Activate quiet mode
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,

    /// Path to the configuration file
    #[structopt(short = "c", long = "config", default_value = "config.toml", parse(from_os_str))]
    pub config: PathBuf,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Add every declared column that is missing from its table
    Migrate {
        /// Path to the migrations file
        #[structopt(
            short = "m",
            long = "migrations",
            default_value = "migrations.toml",
            parse(from_os_str)
        )]
        migrations: PathBuf,

        /// Only print the planned changes
        #[structopt(long = "dry-run")]
        dry_run: bool,

        /// Only migrate this table
        #[structopt(short = "t", long = "table")]
        table: Option<String>,
    },

    /// Export the live schema as DDL statements
    Export {
        /// Write to this file instead of the configured export path or stdout
        #[structopt(short = "o", long = "output", parse(from_os_str))]
        output: Option<PathBuf>,
    },
}
