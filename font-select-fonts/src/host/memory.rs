//! In-memory host backed by a fixed list of records.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Capability, FontAccess, FontRecordStream, PermissionHost, PermissionState};
use crate::catalog::RawFontRecord;
use crate::error::HostError;

/// Host that serves a fixed record list with scripted permission behavior.
///
/// Used for fixture files and tests.
#[derive(Debug)]
pub struct InMemoryHost {
    records: Vec<RawFontRecord>,
    supported: bool,
    query_state: Result<PermissionState, HostError>,
    request_state: Result<PermissionState, HostError>,
    enumeration_error: Option<HostError>,
    permission_requests: AtomicUsize,
}

impl InMemoryHost {
    /// A supported host with permission already granted.
    pub fn new(records: Vec<RawFontRecord>) -> Self {
        Self {
            records,
            supported: true,
            query_state: Ok(PermissionState::Granted),
            request_state: Ok(PermissionState::Granted),
            enumeration_error: None,
            permission_requests: AtomicUsize::new(0),
        }
    }

    /// A host that lacks the enumeration capability entirely.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_permission_query(mut self, state: Result<PermissionState, HostError>) -> Self {
        self.query_state = state;
        self
    }

    pub fn with_permission_request(mut self, state: Result<PermissionState, HostError>) -> Self {
        self.request_state = state;
        self
    }

    /// Fail enumeration after every record has been delivered.
    pub fn with_enumeration_error(mut self, error: HostError) -> Self {
        self.enumeration_error = Some(error);
        self
    }

    /// How many times `request_permission` was called.
    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::Relaxed)
    }
}

impl FontAccess for InMemoryHost {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn query_fonts(&self) -> Result<FontRecordStream, HostError> {
        if !self.supported {
            return Err(HostError::NotImplemented);
        }
        let mut items: Vec<_> = self.records.iter().cloned().map(Ok).collect();
        if let Some(err) = &self.enumeration_error {
            items.push(Err(err.clone()));
        }
        Ok(FontRecordStream::from_items(items))
    }
}

impl PermissionHost for InMemoryHost {
    async fn query_permission(&self, _capability: Capability) -> Result<PermissionState, HostError> {
        self.query_state.clone()
    }

    async fn request_permission(
        &self,
        _capability: Capability,
    ) -> Result<PermissionState, HostError> {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        self.request_state.clone()
    }
}
