//! Warnings CLI command
//!
//! Lists limit warnings recorded by the file sink.

use crate::config::paths::SpendPaths;
use crate::engine::JsonlWarningSink;
use crate::error::SpendResult;
use crate::reports::format_warning_records;

/// Handle the warnings command
pub fn handle_warnings_command(paths: &SpendPaths, limit: usize) -> SpendResult<()> {
    let sink = JsonlWarningSink::new(paths.warnings_log());
    let records = sink.read_recent(limit)?;
    print!("{}", format_warning_records(&records));
    Ok(())
}
