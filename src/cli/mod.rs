//! Command-line interface for simport.
//!
//! # Commands
//!
//! - `resolve` - Resolve a template against a schema and print the import plan
//! - `check-header` - Compare a spreadsheet header row with a template
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: no logging
//!
//! `RUST_LOG` is honoured when neither flag is given.
//!
//! # Examples
//!
//! ```bash
//! simport resolve --template intake.toml --schema openmrs.toml
//! simport resolve --template intake.toml --schema openmrs.toml --rules site.toml --format json
//! simport check-header --template intake.toml --header "Given name,Gender,Notes"
//! ```

mod check_header;
pub mod common;
mod resolve;


use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use check_header::CheckHeaderCommand;
pub use resolve::ResolveCommand;

/// Runtime configuration derived from global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this
    /// more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Spreadsheet import template tooling.
#[derive(Parser)]
#[command(
    name = "simport",
    about = "Resolve spreadsheet import templates against a relational schema",
    version,
    long_about = "simport works out the order in which tables must be populated when importing \
                  spreadsheet rows, and which foreign keys need prespecified values."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a template and print its import plan
    Resolve(ResolveCommand),

    /// Check a spreadsheet header row against a template
    CheckHeader(CheckHeaderCommand),
}

impl Cli {
    /// Execute the parsed command with configuration built from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Resolve(cmd) => cmd.execute().await,
            Commands::CheckHeader(cmd) => cmd.execute().await,
        }
    }
}
