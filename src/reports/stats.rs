//! Stats report rendering
//!
//! The machine-readable formats carry only the stats payload. Warnings are
//! reported through the warning sinks and never appear here.

use std::io::Write;

use crate::error::{SpendError, SpendResult};
use crate::services::StatsReport;

use super::OutputFormat;

const RULE_WIDTH: usize = 60;

/// Format a stats report for terminal display
pub fn format_terminal(report: &StatsReport) -> String {
    let mut output = String::new();
    let stats = &report.stats;

    output.push_str(&format!(
        "Spending for user {}: {} to {}\n",
        report.user_id,
        report.range.from().format("%Y-%m-%d %H:%M:%S"),
        report.range.to().format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');
    if let Some(category) = &report.category {
        output.push_str(&format!("Category Filter: {}\n", category));
    }
    output.push_str(&format!("Total Spent:   {:>12}\n", stats.total_spent));
    output.push_str(&format!("Daily Average: {:>12}\n", stats.daily_average));

    if stats.by_category.is_empty() {
        output.push_str("\nNo spending in this period.\n");
        return output;
    }

    output.push('\n');
    output.push_str(&format!("{:<35} {:>12} {:>8}\n", "Category", "Amount", "%"));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    let total = stats.total_spent.to_f64();
    for (name, amount) in stats.top_categories(stats.by_category.len()) {
        let percentage = if total == 0.0 {
            0.0
        } else {
            amount.to_f64() / total * 100.0
        };
        output.push_str(&format!(
            "{:<35} {:>12} {:>7.1}%\n",
            name, amount, percentage
        ));
    }

    output
}

/// Write the stats payload as JSON
pub fn write_json<W: Write>(report: &StatsReport, writer: &mut W, pretty: bool) -> SpendResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &report.stats)
    } else {
        serde_json::to_writer(&mut *writer, &report.stats)
    };
    result.map_err(|e| SpendError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}

/// Write the stats payload as YAML
pub fn write_yaml<W: Write>(report: &StatsReport, writer: &mut W) -> SpendResult<()> {
    serde_yaml::to_writer(writer, &report.stats).map_err(|e| SpendError::Export(e.to_string()))
}

/// Write one CSV row per category, then `TOTAL` and `DAILY_AVERAGE` rows
pub fn write_csv<W: Write>(report: &StatsReport, writer: &mut W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let user_id = report.user_id.to_string();
    let from = report.range.from().to_rfc3339();
    let to = report.range.to().to_rfc3339();

    csv_writer
        .write_record(["user_id", "from", "to", "category", "amount"])
        .map_err(|e| SpendError::Export(e.to_string()))?;

    let mut write_row = |label: &str, amount: String| {
        csv_writer
            .write_record([user_id.as_str(), from.as_str(), to.as_str(), label, amount.as_str()])
            .map_err(|e| SpendError::Export(e.to_string()))
    };

    for (name, amount) in &report.stats.by_category {
        write_row(name, amount.to_string())?;
    }
    write_row("TOTAL", report.stats.total_spent.to_string())?;
    write_row("DAILY_AVERAGE", report.stats.daily_average.to_string())?;

    csv_writer.flush().map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}

/// Render a report in the requested format
pub fn render_stats<W: Write>(
    report: &StatsReport,
    format: OutputFormat,
    writer: &mut W,
) -> SpendResult<()> {
    match format {
        OutputFormat::Table => write!(writer, "{}", format_terminal(report))
            .map_err(|e| SpendError::Export(e.to_string())),
        OutputFormat::Json => write_json(report, writer, true),
        OutputFormat::Yaml => write_yaml(report, writer),
        OutputFormat::Csv => write_csv(report, writer),
    }
}
