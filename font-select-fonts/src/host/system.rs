//! System font host backed by fontdb.
//!
//! Desktop platforms have no permission gate for installed fonts, so the
//! permission half always reports `Granted`. Enumeration runs on a blocking
//! thread and streams records back as faces are read.

use fontdb::{Database, FaceInfo, Style, Weight};
use swash::{FontRef, StringId};

use super::{Capability, FontAccess, FontRecordStream, PermissionHost, PermissionState};
use crate::catalog::RawFontRecord;
use crate::error::HostError;

/// Enumerates fonts installed on this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFontHost;

impl SystemFontHost {
    pub fn new() -> Self {
        Self
    }
}

impl FontAccess for SystemFontHost {
    fn is_supported(&self) -> bool {
        true
    }

    async fn query_fonts(&self) -> Result<FontRecordStream, HostError> {
        let (tx, stream) = FontRecordStream::channel(FontRecordStream::CAPACITY);

        tokio::task::spawn_blocking(move || {
            let mut font_db = Database::new();
            font_db.load_system_fonts();
            log::info!("Loaded {} system fonts", font_db.len());

            for face in font_db.faces() {
                let Some(record) = record_for_face(&font_db, face) else {
                    continue;
                };
                if tx.blocking_send(Ok(record)).is_err() {
                    log::debug!("Font record consumer went away, stopping enumeration");
                    break;
                }
            }
        });

        Ok(stream)
    }
}

impl PermissionHost for SystemFontHost {
    async fn query_permission(&self, _capability: Capability) -> Result<PermissionState, HostError> {
        Ok(PermissionState::Granted)
    }

    async fn request_permission(
        &self,
        _capability: Capability,
    ) -> Result<PermissionState, HostError> {
        Ok(PermissionState::Granted)
    }
}

/// Build a raw record from a fontdb face, reading the full name from the
/// font's name table.
fn record_for_face(font_db: &Database, face: &FaceInfo) -> Option<RawFontRecord> {
    // fontdb lists the English family name first.
    let family = face.families.first().map(|(name, _)| name.clone())?;

    let full_name = font_db
        .with_face_data(face.id, |data, index| read_full_name(data, index))
        .flatten()
        .unwrap_or_else(|| synthesize_full_name(&family, face.weight, face.style));

    Some(RawFontRecord {
        family,
        full_name,
        postscript_name: face.post_script_name.clone(),
    })
}

fn read_full_name(data: &[u8], index: u32) -> Option<String> {
    let font = FontRef::from_index(data, index as usize)?;
    let strings = font.localized_strings();
    let name = strings
        .find_by_id(StringId::Full, Some("en"))
        .or_else(|| strings.find_by_id(StringId::Full, None))?;
    let name: String = name.chars().collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Fallback full name for faces without a name table entry.
fn synthesize_full_name(family: &str, weight: Weight, style: Style) -> String {
    let weight_name = match weight.0 {
        0..=150 => Some("Thin"),
        151..=250 => Some("ExtraLight"),
        251..=350 => Some("Light"),
        351..=450 => None,
        451..=550 => Some("Medium"),
        551..=650 => Some("SemiBold"),
        651..=750 => Some("Bold"),
        751..=850 => Some("ExtraBold"),
        _ => Some("Black"),
    };
    let style_name = match style {
        Style::Normal => None,
        Style::Italic => Some("Italic"),
        Style::Oblique => Some("Oblique"),
    };

    let suffix: Vec<&str> = weight_name.into_iter().chain(style_name).collect();
    if suffix.is_empty() {
        family.to_string()
    } else {
        format!("{} {}", family, suffix.join(" "))
    }
}
