//! TOML configuration parsing.
//!
//! Template definitions, schema descriptions and override rule files are all
//! TOML documents read through [`read_config`]. Syntax and shape errors are
//! reported as [`SimportError::TemplateParseError`] naming the file, with the
//! underlying TOML error as the reason.
//!
//! ```rust,no_run
//! use simport_cli::config::read_config;
//! use simport_cli::schema::StaticSchema;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let schema: StaticSchema = read_config(Path::new("schema.toml"), "schema").await?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::core::SimportError;

/// Read a TOML file into any deserialisable type; `kind` names the file in
/// read errors ("template", "schema", ...).
pub async fn read_config<T>(path: &Path, kind: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {kind} file: {}", path.display()))?;

    parse_config_str(&content, &path.display().to_string())
}

/// Parse TOML text; `origin` names the source in error messages.
pub fn parse_config_str<T>(content: &str, origin: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    toml::from_str(content).map_err(|e| {
        SimportError::TemplateParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
