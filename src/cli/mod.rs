//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod import;
pub mod reset;
pub mod stats;
pub mod user;
pub mod warnings;

pub use import::handle_import_command;
pub use reset::handle_reset_command;
pub use stats::{build_warning_sink, handle_stats_command, resolve_limits, StatsArgs};
pub use user::handle_user_command;
pub use warnings::handle_warnings_command;
