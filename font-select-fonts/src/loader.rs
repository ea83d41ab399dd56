//! Asynchronous catalog loader.

use crate::catalog::{Catalog, RawFontRecord};
use crate::error::{HostError, LoadError};
use crate::host::{Capability, FontAccess, PermissionHost, PermissionState};
use crate::registrar::FontRegistrar;

/// Enumerate local fonts through `host` and build a catalog.
///
/// Suspends while the host prompts for permission and streams records.
/// When `registrar` is set, every variant of the finished catalog is
/// registered with it. A failed load registers nothing and yields no
/// partial catalog.
pub async fn load_catalog<H>(
    host: &H,
    registrar: Option<&dyn FontRegistrar>,
) -> Result<Catalog, LoadError>
where
    H: FontAccess + PermissionHost,
{
    if !host.is_supported() {
        log::warn!("Local font enumeration unavailable on this host");
        return Err(LoadError::CapabilityUnavailable);
    }

    ensure_permission(host).await?;

    let mut stream = host.query_fonts().await.map_err(map_enumeration_error)?;
    let mut records: Vec<RawFontRecord> = Vec::new();
    while let Some(item) = stream.next().await {
        records.push(item.map_err(map_enumeration_error)?);
    }
    log::debug!("Received {} font records from host", records.len());

    let catalog = Catalog::from_records(records);
    log::info!(
        "Font catalog loaded: {} families, {} variants",
        catalog.len(),
        catalog.variant_count()
    );

    if let Some(registrar) = registrar {
        for variant in catalog.variants() {
            registrar.register(variant);
        }
    }

    Ok(catalog)
}

/// Query the grant and request it when not already given.
///
/// A query the permission system does not implement is treated as an
/// implicit grant; enumeration itself still reports a denial. A request the
/// host does not implement means the capability is unusable.
async fn ensure_permission<H: PermissionHost>(host: &H) -> Result<(), LoadError> {
    let capability = Capability::LocalFonts;

    match host.query_permission(capability).await {
        Ok(PermissionState::Granted) => return Ok(()),
        Ok(state) => log::debug!("Permission {} is {:?}, requesting", capability.name(), state),
        Err(HostError::NotImplemented) => {
            log::debug!("Permission query not implemented, assuming implicit grant");
            return Ok(());
        }
        Err(HostError::Denied) => return Err(LoadError::PermissionDenied),
        Err(e) => return Err(LoadError::Platform(e)),
    }

    match host.request_permission(capability).await {
        Ok(PermissionState::Granted) => Ok(()),
        Ok(state) => {
            log::warn!("Permission {} not granted ({:?})", capability.name(), state);
            Err(LoadError::PermissionDenied)
        }
        Err(HostError::NotImplemented) => {
            log::warn!("Permission request not implemented by host");
            Err(LoadError::CapabilityUnavailable)
        }
        Err(HostError::Denied) => Err(LoadError::PermissionDenied),
        Err(e) => Err(LoadError::Platform(e)),
    }
}

fn map_enumeration_error(err: HostError) -> LoadError {
    match err {
        HostError::Denied => LoadError::PermissionDenied,
        HostError::NotImplemented => LoadError::CapabilityUnavailable,
        other => LoadError::Platform(other),
    }
}
