//! Command-line argument parsing for the inspection tool
//!
//! Supports:
//! - Reading a file or stdin
//! - Text or JSON token dumps
//! - Placing the caret for brace and line diagnostics
//! - Verifying the model against a from-scratch lex

use clap::Parser;
use std::path::PathBuf;

use crate::config::{OutputFormat, ScanConfig};

/// Classify braces, quotes and comments in a source file
#[derive(Parser, Debug)]
#[command(
    name = "reduced-model",
    version,
    about = "Classify braces, quotes and comments in a source file"
)]
pub struct CliArgs {
    /// File to scan (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format for the token dump
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail if the incremental model disagrees with a full rescan
    #[arg(long)]
    pub verify: bool,

    /// Print highlight spans for the whole document
    #[arg(long)]
    pub highlight: bool,

    /// Place the caret at character offset N and report on it
    #[arg(long, value_name = "N")]
    pub caret: Option<usize>,

    /// Read defaults from this config file instead of the standard one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Settings for one run, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub verify: bool,
    pub highlight: bool,
    pub caret: Option<usize>,
}

impl CliArgs {
    /// Merge parsed CLI args over `defaults`
    pub fn into_config(self, defaults: ScanConfig) -> Result<RunConfig, String> {
        if let Some(path) = &self.file {
            if path.is_dir() {
                return Err(format!("{} is a directory", path.display()));
            }
        }

        Ok(RunConfig {
            input: self.file,
            format: self.format.unwrap_or(defaults.format),
            verify: self.verify || defaults.verify,
            highlight: self.highlight || defaults.highlight,
            caret: self.caret,
        })
    }

    /// The config file the defaults come from
    pub fn load_defaults(&self) -> ScanConfig {
        match &self.config {
            Some(path) => ScanConfig::load_from(path),
            None => ScanConfig::load(),
        }
    }
}
