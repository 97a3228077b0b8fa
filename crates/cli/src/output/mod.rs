//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats, plus the console table renderer.

mod formatter;
pub mod table;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
