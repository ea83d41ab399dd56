//! Configuration system for the font-select widget.
//!
//! This crate provides configuration loading, saving, and default values
//! for the widget. It includes:
//!
//! - Initial attribute markers (`disabled`, `multiple`, `autofocus`, `value`)
//! - Preview list layout selection (flat or drill-down)
//! - Log level for the debug log bridge
//! - Typed errors for config I/O and validation

pub mod config;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{Layout, LogLevel};
