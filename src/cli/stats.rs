//! Stats CLI command
//!
//! Runs a spending query and renders it. Limit warnings go to the sinks
//! enabled in settings, never to the rendered payload.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::paths::SpendPaths;
use crate::config::settings::Settings;
use crate::engine::{FanoutWarningSink, JsonlWarningSink, LimitConfig, LogWarningSink};
use crate::error::{SpendError, SpendResult};
use crate::models::{DateRange, Money, UserId};
use crate::reports::{format_warning_notices, render_stats, OutputFormat};
use crate::services::{StatsQuery, StatsService};
use crate::storage::Storage;

/// Arguments for `stats`
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// User ID
    pub user_id: i64,

    /// Start of the range (RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// End of the range, inclusive
    #[arg(long)]
    pub to: String,

    /// Only aggregate this category (exact match)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the daily spending limit
    #[arg(long, env = "SPENDWATCH_DAILY_LIMIT")]
    pub daily_limit: Option<String>,

    /// Override the weekly spending limit
    #[arg(long, env = "SPENDWATCH_WEEKLY_LIMIT")]
    pub weekly_limit: Option<String>,
}

/// Handle the stats command
pub fn handle_stats_command(
    storage: &Storage,
    settings: &Settings,
    args: StatsArgs,
) -> SpendResult<()> {
    let range = DateRange::parse(&args.from, &args.to)?;
    let limits = resolve_limits(
        settings.limit_config(),
        args.daily_limit.as_deref(),
        args.weekly_limit.as_deref(),
    )?;
    let sink = build_warning_sink(settings, storage.paths());

    let service = StatsService::from_storage(storage, &sink, limits);
    let mut query = StatsQuery::new(UserId::new(args.user_id), range);
    if let Some(category) = args.category {
        query = query.category(category);
    }

    let report = service.stats(&query)?;
    let format = args.format.unwrap_or(settings.default_format);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SpendError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            render_stats(&report, format, &mut writer)?;
            writer.flush().map_err(|e| SpendError::Export(e.to_string()))?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            render_stats(&report, format, &mut handle)?;
        }
    }

    // The log sink already reports warnings on stderr when enabled
    if format == OutputFormat::Table && !settings.warnings.log {
        eprint!("{}", format_warning_notices(&report.warnings));
    }

    Ok(())
}

/// Apply command-line limit overrides on top of the configured limits
pub fn resolve_limits(
    base: LimitConfig,
    daily: Option<&str>,
    weekly: Option<&str>,
) -> SpendResult<LimitConfig> {
    let mut limits = base;
    if let Some(value) = daily {
        limits = limits.with_daily_limit(parse_limit("daily", value)?);
    }
    if let Some(value) = weekly {
        limits = limits.with_weekly_limit(parse_limit("weekly", value)?);
    }
    Ok(limits)
}

fn parse_limit(name: &str, value: &str) -> SpendResult<Money> {
    let limit = Money::parse(value).map_err(|e| {
        SpendError::Validation(format!("Invalid {} limit '{}': {}", name, value, e))
    })?;

    if !limit.is_positive() {
        return Err(SpendError::Validation(format!(
            "The {} limit must be positive, got {}",
            name, limit
        )));
    }

    Ok(limit)
}

/// Build the warning sinks enabled in settings
pub fn build_warning_sink(settings: &Settings, paths: &SpendPaths) -> FanoutWarningSink {
    let mut sink = FanoutWarningSink::new();
    if settings.warnings.log {
        sink = sink.with(LogWarningSink);
    }
    if settings.warnings.file {
        sink = sink.with(JsonlWarningSink::new(paths.warnings_log()));
    }
    sink
}
