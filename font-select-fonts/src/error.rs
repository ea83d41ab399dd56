//! Typed error types for font-select-fonts.

use thiserror::Error;

/// Failure reported by a host capability (font access or permissions).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host does not implement the requested operation.
    #[error("operation not implemented by host")]
    NotImplemented,

    /// The host refused access to local fonts.
    #[error("access to local fonts was denied by the host")]
    Denied,

    /// Any other platform-level fault.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Outcome of a failed catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The user declined font access. The widget degrades to a disabled input;
    /// there is no retry without a new user gesture.
    #[error("permission to access local fonts was denied")]
    PermissionDenied,

    /// The host cannot enumerate fonts at all. Permanent degrade.
    #[error("local font enumeration is not available on this host")]
    CapabilityUnavailable,

    /// Unexpected platform fault. Propagated, never swallowed.
    #[error("font enumeration failed: {0}")]
    Platform(#[source] HostError),
}

impl LoadError {
    /// Whether this outcome is handled locally by degrading the widget.
    pub fn is_degrade(&self) -> bool {
        matches!(
            self,
            LoadError::PermissionDenied | LoadError::CapabilityUnavailable
        )
    }
}
