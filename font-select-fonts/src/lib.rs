//! Font catalog loading for the font-select widget.
//!
//! This crate provides:
//! - The catalog data model (`FontVariant`, `FontFamilyGroup`, `Catalog`)
//! - Host capability traits for font enumeration and permission prompts
//! - The asynchronous catalog loader with typed degrade outcomes
//! - An idempotent, process-wide font-face registry
//!
//! # Architecture
//!
//! `load_catalog` drives a host through a fixed sequence:
//! 1. Feature detection (`FontAccess::is_supported`)
//! 2. Permission query, then request when not yet granted
//! 3. Lazy enumeration of raw font records
//! 4. Grouping by family, label derivation and ordering
//! 5. Registration of every variant with the injected `FontRegistrar`
//!
//! Two hosts ship with the crate: `SystemFontHost` (fontdb + swash) and
//! `InMemoryHost` for fixtures and tests.

pub mod catalog;
pub mod error;
pub mod host;
pub mod loader;
pub mod registrar;

// Re-export main types for convenience
pub use catalog::{Catalog, FontFamilyGroup, FontVariant, REGULAR, RawFontRecord};
pub use error::{HostError, LoadError};
pub use host::{
    Capability, FontAccess, FontRecordStream, InMemoryHost, PermissionHost, PermissionState,
    SystemFontHost,
};
pub use loader::load_catalog;
pub use registrar::{FontFaceRegistry, FontFaceRule, FontRegistrar};
