//! Reports module for spendwatch
//!
//! Renders stats results and recorded warnings for the terminal or as
//! JSON, YAML and CSV documents.

pub mod stats;
pub mod warnings;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use stats::{format_terminal, render_stats, write_csv, write_json, write_yaml};
pub use warnings::{format_warning_notices, format_warning_records};

/// Output format for stats results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON document `{total_spent, by_category, daily_average}`
    Json,
    /// YAML version of the JSON document
    Yaml,
    /// One row per category plus total and average rows
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
