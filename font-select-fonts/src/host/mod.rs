//! Host capabilities consumed by the catalog loader.
//!
//! The loader never talks to a platform directly. It goes through two
//! capabilities: [`FontAccess`] (feature detection plus lazy enumeration)
//! and [`PermissionHost`] (query/request pair for the one-time grant).

mod memory;
mod system;

pub use memory::InMemoryHost;
pub use system::SystemFontHost;

use tokio::sync::mpsc;

use crate::catalog::RawFontRecord;
use crate::error::HostError;

/// Capabilities a permission host can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    LocalFonts,
}

impl Capability {
    /// Name used by permission prompts and logs.
    pub fn name(self) -> &'static str {
        match self {
            Capability::LocalFonts => "local-fonts",
        }
    }
}

/// State returned by a permission query or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The host will ask the user on the next request.
    Prompt,
}

/// Lazily produced sequence of font records.
///
/// Records arrive over a bounded channel so a host can enumerate on a
/// blocking thread while the loader consumes them without blocking.
#[derive(Debug)]
pub struct FontRecordStream {
    rx: mpsc::Receiver<Result<RawFontRecord, HostError>>,
}

impl FontRecordStream {
    /// Default channel capacity for streaming hosts.
    pub const CAPACITY: usize = 64;

    /// Create a connected sender/stream pair.
    pub fn channel(
        capacity: usize,
    ) -> (mpsc::Sender<Result<RawFontRecord, HostError>>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self { rx })
    }

    /// A stream that yields `items` in order, then ends.
    pub fn from_items(items: Vec<Result<RawFontRecord, HostError>>) -> Self {
        let (tx, stream) = Self::channel(items.len());
        for item in items {
            // Capacity covers every item, so this never fails.
            let _ = tx.try_send(item);
        }
        stream
    }

    /// Next record, or `None` once the host has finished.
    pub async fn next(&mut self) -> Option<Result<RawFontRecord, HostError>> {
        self.rx.recv().await
    }
}

/// Host font-enumeration capability.
#[allow(async_fn_in_trait)]
pub trait FontAccess {
    /// Feature detection: whether enumeration exists on this host at all.
    fn is_supported(&self) -> bool;

    /// Start enumerating locally installed fonts.
    async fn query_fonts(&self) -> Result<FontRecordStream, HostError>;
}

/// Host permission system.
#[allow(async_fn_in_trait)]
pub trait PermissionHost {
    async fn query_permission(&self, capability: Capability) -> Result<PermissionState, HostError>;

    /// May prompt the user. Hosts without a prompt return `NotImplemented`.
    async fn request_permission(
        &self,
        capability: Capability,
    ) -> Result<PermissionState, HostError>;
}
