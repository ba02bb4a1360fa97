//! Input loading shared by CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::read_config;
use crate::resolver::OverrideRules;
use crate::schema::StaticSchema;
use crate::template::{Template, TemplateDefinition};

/// Output formats accepted by `--format`.
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// Reject unknown `--format` values.
pub fn validate_format(format: &str) -> Result<()> {
    if OUTPUT_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Invalid format '{format}'. Valid formats are: {}",
            OUTPUT_FORMATS.join(", ")
        ))
    }
}

pub async fn load_template(path: &Path) -> Result<Template> {
    let definition: TemplateDefinition = read_config(path, "template").await?;
    Template::from_definition(definition)
        .with_context(|| format!("Invalid template in {}", path.display()))
}

pub async fn load_schema(path: &Path) -> Result<StaticSchema> {
    read_config(path, "schema").await
}

/// Standard rules (unless disabled) followed by every rule file in order.
pub async fn load_rules(paths: &[PathBuf], standard: bool) -> Result<OverrideRules> {
    let mut rules = if standard {
        OverrideRules::standard()
    } else {
        OverrideRules::empty()
    };

    for path in paths {
        let extra: OverrideRules = read_config(path, "rules").await?;
        tracing::debug!("Loaded {} override rules from {}", extra.len(), path.display());
        rules.extend(extra);
    }
    Ok(rules)
}
