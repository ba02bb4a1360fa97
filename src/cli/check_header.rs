//! Compare a spreadsheet header row with a template.
//!
//! ```bash
//! simport check-header --template intake.toml --header "Given name,Gender,Notes"
//! ```
//!
//! Cells are compared verbatim, surrounding whitespace included. Extra
//! spreadsheet columns are reported and ignored; template columns
//! missing from the spreadsheet are listed as warnings. The command only
//! fails when the header row is empty.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{load_template, validate_format};
use crate::header::{HeaderReport, reconcile_header};
use crate::utils::join_human;

/// Command to check a header row against a template.
#[derive(Args, Debug)]
pub struct CheckHeaderCommand {
    /// Template definition file
    #[arg(short, long)]
    template: PathBuf,

    /// Header cells, comma separated and matched exactly as given
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    header: Vec<String>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

impl CheckHeaderCommand {
    pub async fn execute(self) -> Result<()> {
        validate_format(&self.format)?;

        let template = load_template(&self.template).await?;
        let report = reconcile_header(&template, &self.header);

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => output_text(&report),
        }

        if report.is_blocking() {
            bail!("Spreadsheet header row must not be empty");
        }
        Ok(())
    }
}

fn output_text(report: &HeaderReport) {
    if report.is_clean() {
        println!("{}", "✓ Header matches template".green());
        return;
    }

    if !report.missing.is_empty() && !report.empty_header {
        println!(
            "{} Template columns not in spreadsheet: {}",
            "⚠".yellow(),
            join_human(&report.missing)
        );
    }
    for message in report.messages() {
        println!("{} {message}", "⚠".yellow());
    }
}
