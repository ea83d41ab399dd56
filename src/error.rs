//! Typed errors for widget operations.

use thiserror::Error;

/// Why a value could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The text or value names no family or variant in the catalog.
    /// The widget has already recovered by clearing its text and value.
    #[error("'{0}' does not match any installed font")]
    UnrecognizedSelection(String),

    /// The widget is disabled, still loading, or degraded.
    #[error("font selection is not available")]
    NotInteractive,

    /// A variation was chosen before any family was committed.
    #[error("no font family is selected")]
    NoFamily,
}
