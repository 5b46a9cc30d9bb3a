//! User settings for SpendWatch
//!
//! Holds the spending limits, which warning sinks are active, the optional
//! seed file imported into an empty store, and the default report format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::SpendPaths;
use crate::engine::LimitConfig;
use crate::error::SpendError;
use crate::models::Money;
use crate::reports::OutputFormat;

/// Spending limit thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Maximum spend per UTC calendar day
    #[serde(default = "default_daily_limit")]
    pub daily_limit: Money,

    /// Maximum spend per rolling seven days
    #[serde(default = "default_weekly_limit")]
    pub weekly_limit: Money,
}

fn default_daily_limit() -> Money {
    Money::from_cents(100_000)
}

fn default_weekly_limit() -> Money {
    Money::from_cents(500_000)
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            weekly_limit: default_weekly_limit(),
        }
    }
}

/// Where limit warnings are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSettings {
    /// Emit warnings as log events
    #[serde(default = "default_true")]
    pub log: bool,

    /// Append warnings to data/warnings.jsonl
    #[serde(default = "default_true")]
    pub file: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            log: true,
            file: true,
        }
    }
}

/// User settings for SpendWatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub warnings: WarningSettings,

    /// Data file imported on first query when the store is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Report format used when none is given on the command line
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            limits: LimitSettings::default(),
            warnings: WarningSettings::default(),
            seed_file: None,
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Engine limit configuration from these settings
    pub fn limit_config(&self) -> LimitConfig {
        LimitConfig::new(self.limits.daily_limit, self.limits.weekly_limit)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, SpendError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SpendError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SpendError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendPaths) -> Result<(), SpendError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Limits must be positive
    pub fn validate(&self) -> Result<(), SpendError> {
        if !self.limits.daily_limit.is_positive() || !self.limits.weekly_limit.is_positive() {
            return Err(SpendError::Config(format!(
                "Limits must be positive (daily {}, weekly {})",
                self.limits.daily_limit, self.limits.weekly_limit
            )));
        }
        Ok(())
    }
}
