//! Warning sinks
//!
//! The limit monitor reports through a [`WarningSink`]. Recording is
//! best-effort: a sink never fails the query that produced the warning.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SpendError, SpendResult};
use crate::models::LimitWarning;

/// Receiver of limit warnings.
///
/// `record` must be fast and must not fail the caller.
pub trait WarningSink: Send + Sync {
    fn record(&self, warning: &LimitWarning);

    fn record_all(&self, warnings: &[LimitWarning]) {
        for warning in warnings {
            self.record(warning);
        }
    }
}

/// Discards warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpWarningSink;

impl WarningSink for NoOpWarningSink {
    fn record(&self, _warning: &LimitWarning) {}
}

/// Emits each warning as a structured `WARN` log event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn record(&self, warning: &LimitWarning) {
        warn!(
            scope = ?warning.scope,
            user_id = %warning.user_id,
            window = %warning.window,
            spent = %warning.spent,
            limit = %warning.limit,
            "{}",
            warning
        );
    }
}

/// Collects warnings in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingWarningSink {
    warnings: Arc<Mutex<Vec<LimitWarning>>>,
}

impl CollectingWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected warnings, oldest first
    pub fn warnings(&self) -> Vec<LimitWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.warnings().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for CollectingWarningSink {
    fn record(&self, warning: &LimitWarning) {
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning.clone()),
            Err(poisoned) => poisoned.into_inner().push(warning.clone()),
        }
    }
}

/// Forwards every warning to each inner sink
#[derive(Default)]
pub struct FanoutWarningSink {
    sinks: Vec<Box<dyn WarningSink>>,
}

impl FanoutWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl WarningSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl WarningSink for FanoutWarningSink {
    fn record(&self, warning: &LimitWarning) {
        for sink in &self.sinks {
            sink.record(warning);
        }
    }
}

/// One line of the warnings log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub warning: LimitWarning,
}

/// Appends warnings to a line-delimited JSON file
pub struct JsonlWarningSink {
    log_path: PathBuf,
}

impl JsonlWarningSink {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn append(&self, warning: &LimitWarning) -> SpendResult<()> {
        let record = WarningRecord {
            recorded_at: Utc::now(),
            warning: warning.clone(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SpendError::Io(format!("Failed to open warnings log: {}", e)))?;

        let json = serde_json::to_string(&record)
            .map_err(|e| SpendError::Json(format!("Failed to serialize warning: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| SpendError::Io(format!("Failed to write warning: {}", e)))?;

        file.flush()
            .map_err(|e| SpendError::Io(format!("Failed to flush warnings log: {}", e)))?;

        Ok(())
    }

    /// Read all records, oldest first
    pub fn read_all(&self) -> SpendResult<Vec<WarningRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SpendError::Io(format!("Failed to open warnings log: {}", e)))?;

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                SpendError::Io(format!("Failed to read warnings log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: WarningRecord = serde_json::from_str(&line).map_err(|e| {
                SpendError::Json(format!(
                    "Failed to parse warning at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// Read the most recent `count` records
    pub fn read_recent(&self, count: usize) -> SpendResult<Vec<WarningRecord>> {
        let all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }
}

impl WarningSink for JsonlWarningSink {
    fn record(&self, warning: &LimitWarning) {
        if let Err(e) = self.append(warning) {
            warn!(error = %e, path = %self.log_path.display(), "could not record limit warning");
        }
    }
}
