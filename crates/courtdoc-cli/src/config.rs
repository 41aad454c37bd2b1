//! Configuration file handling for `.courtdoc.toml`
//!
//! Files are read from, in increasing precedence:
//! 1. the user's home directory (`~/.courtdoc.toml`)
//! 2. the working directory (`./.courtdoc.toml`)
//! 3. a file passed with `--config`
//!
//! Later files override earlier ones key by key, so a project file that only
//! sets `[tools] tesseract` keeps every other tool from the user file.
//! Command-line flags override all of them.

use anyhow::{Context, Result};
use courtdoc_backend::ExtractConfig;
use courtdoc_core::ToolConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the home and working directories
pub const CONFIG_FILE_NAME: &str = ".courtdoc.toml";

/// Merged configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External programs
    pub tools: ToolConfig,
    /// Extraction defaults
    pub extract: ExtractConfig,
    /// Opinion parsing
    pub court: CourtConfig,
}

/// `[court]` section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    /// TOML court table replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
    /// Default key for the special and folder court tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl Config {
    /// Discover and merge the user and project files, then `explicit`.
    ///
    /// Unreadable user or project files are skipped with a warning; an
    /// unreadable explicit file is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        let user = dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME));
        let project = Some(PathBuf::from(CONFIG_FILE_NAME));
        for path in user.iter().chain(project.iter()) {
            if !path.exists() {
                continue;
            }
            match read_table(path) {
                Ok(table) => {
                    debug!("Loaded config from {}", path.display());
                    merge_tables(&mut merged, table);
                }
                Err(e) => warn!("Ignoring config {}: {e:#}", path.display()),
            }
        }

        if let Some(path) = explicit {
            merge_tables(&mut merged, read_table(path)?);
        }

        Self::from_table(merged)
    }

    /// Build a configuration from a parsed TOML table
    pub fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .context("Invalid configuration")
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    content
        .parse::<toml::Table>()
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Recursively overlay `overlay` onto `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
            (base.get_mut(&key), &value)
        {
            merge_tables(existing, incoming.clone());
            continue;
        }
        base.insert(key, value);
    }
}
