//! Configuration management for the SQL workbench language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration file
//!
//! Precedence: command line over config file over built-in defaults.

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::sql::Dialect;
use crate::validation::session::DEFAULT_DEBOUNCE;

/// Command-line arguments for the SQL workbench language server
#[derive(Debug, Parser)]
#[command(name = "sqllab-language-server")]
#[command(about = "Language server for the SQL workbench editor")]
#[command(version)]
pub struct Args {
    /// Default SQL dialect for query validation
    #[arg(long, help = "SQL dialect (e.g. 'postgresql', 'mysql', 'sqlite')")]
    pub dialect: Option<String>,

    /// Quiet period before a content change is validated
    #[arg(long, help = "Debounce window in milliseconds")]
    pub debounce_ms: Option<u64>,

    /// Custom configuration file
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Shape of the on-disk configuration file; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub dialect: Option<Dialect>,
    pub debounce_ms: Option<u64>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub dialect: Dialect,
    pub debounce: Duration,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match config_path(&args) {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw)?
            }
            _ => FileConfig::default(),
        };

        let dialect = args
            .dialect
            .as_deref()
            .map(Dialect::from_name)
            .or(file.dialect)
            .unwrap_or_default();

        let debounce = args
            .debounce_ms
            .or(file.debounce_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE);

        Ok(Config {
            dialect,
            debounce,
            log_level: args.log_level,
        })
    }
}

fn config_path(args: &Args) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }
    dirs::config_dir().map(|dir| dir.join("sqllab-ls").join("config.toml"))
}
