//! Resolve a template and print its import plan.
//!
//! # Examples
//!
//! ```bash
//! # Standard OpenMRS rules
//! simport resolve --template intake.toml --schema openmrs.toml
//!
//! # Site-specific rules on top of the standard ones
//! simport resolve -t intake.toml -s openmrs.toml --rules site.toml
//!
//! # Only the rules from a file, as JSON
//! simport resolve -t intake.toml -s openmrs.toml --rules all.toml --no-standard-rules -f json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{load_rules, load_schema, load_template, validate_format};
use crate::resolver::{ImportPlan, resolve_template_dependencies};
use crate::template::{Column, PrespecifiedValue, Template};

/// Command to resolve a template against a schema.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Template definition file
    #[arg(short, long)]
    template: PathBuf,

    /// Schema description file
    #[arg(short, long)]
    schema: PathBuf,

    /// Additional override rules file (repeatable, applied in order)
    #[arg(short, long)]
    rules: Vec<PathBuf>,

    /// Do not apply the standard OpenMRS override rules
    #[arg(long)]
    no_standard_rules: bool,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

/// JSON shape of a resolved template.
#[derive(Serialize)]
struct ResolveOutput<'a> {
    template: &'a str,
    encounter: bool,
    table_order: &'a [String],
    columns: Vec<&'a Column>,
    prespecified_values: Vec<&'a PrespecifiedValue>,
}

impl ResolveCommand {
    pub async fn execute(self) -> Result<()> {
        validate_format(&self.format)?;

        let mut template = load_template(&self.template).await?;
        let schema = load_schema(&self.schema).await?;
        let rules = load_rules(&self.rules, !self.no_standard_rules).await?;

        tracing::debug!(
            "Resolving {} against {} with {} override rules",
            self.template.display(),
            self.schema.display(),
            rules.len()
        );

        let plan = resolve_template_dependencies(&mut template, &schema, &rules)?;

        match self.format.as_str() {
            "json" => output_json(&template, &plan)?,
            _ => output_text(&template, &plan),
        }
        Ok(())
    }
}

fn ordered_columns<'a>(template: &'a Template, plan: &ImportPlan) -> Vec<&'a Column> {
    plan.column_order().iter().filter_map(|id| template.column(*id)).collect()
}

fn output_json(template: &Template, plan: &ImportPlan) -> Result<()> {
    let output = ResolveOutput {
        template: template.name(),
        encounter: template.is_encounter(),
        table_order: plan.table_order(),
        columns: ordered_columns(template, plan),
        prespecified_values: template.prespecified_values().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_text(template: &Template, plan: &ImportPlan) {
    let kind = if template.is_encounter() {
        " (encounter)"
    } else {
        ""
    };
    println!("{}{}", template.name().cyan().bold(), kind.bright_black());

    println!("\n{}", "Table order:".bold());
    for (i, table) in plan.table_order().iter().enumerate() {
        println!("  {}. {table}", i + 1);
    }

    println!("\n{}", "Columns:".bold());
    for column in ordered_columns(template, plan) {
        let idx = column.import_idx().map_or_else(|| "-".to_string(), |i| i.to_string());
        println!(
            "  [{idx}] {} {}",
            column.name().green(),
            format!("→ {}.{} ({})", column.table_name(), column.column_name(), column.unique_import())
                .bright_black()
        );
        for edge in column.import_before() {
            let first = template.column(edge.column_import_first).map_or("?", Column::name);
            println!("        after {first} via {}", edge.column_name);
        }
    }

    let values: Vec<_> = template.prespecified_values().collect();
    if values.is_empty() {
        return;
    }

    println!("\n{}", "Prespecified values:".bold());
    for value in values {
        let literal = value.value().map_or_else(|| "unset".yellow(), |v| v.normal());
        println!("  {} = {literal}", value.table_dot_column());
        for link in value.column_prespecified_values() {
            let name = template.column(link.column).map_or("?", Column::name);
            println!("        {name} via {}", link.column_name);
        }
    }
}
