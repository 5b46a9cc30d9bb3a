//! Configuration module for SpendWatch
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence (limits, warning delivery, seed data)

pub mod paths;
pub mod settings;

pub use paths::SpendPaths;
pub use settings::Settings;
