//! Catalog data model: variants grouped by family.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display label used for a variant whose full name is just the family name.
pub const REGULAR: &str = "Regular";

/// One font record as reported by the host's enumeration capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFontRecord {
    pub family: String,
    pub full_name: String,
    #[serde(default)]
    pub postscript_name: String,
}

impl RawFontRecord {
    pub fn new(
        family: impl Into<String>,
        full_name: impl Into<String>,
        postscript_name: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            full_name: full_name.into(),
            postscript_name: postscript_name.into(),
        }
    }
}

/// One concrete style within a family (e.g. "Arial Bold").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontVariant {
    full_name: String,
    family: String,
    postscript_name: String,
    variation_label: String,
}

impl FontVariant {
    /// Build a variant, deriving its variation label from the full name.
    pub fn from_record(record: RawFontRecord) -> Self {
        let variation_label = derive_variation_label(&record.full_name, &record.family);
        Self {
            full_name: record.full_name,
            family: record.family,
            postscript_name: record.postscript_name,
            variation_label,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// System-level alternate name; may be empty.
    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn variation_label(&self) -> &str {
        &self.variation_label
    }

    pub fn is_regular(&self) -> bool {
        self.variation_label == REGULAR
    }
}

/// Strip the family name from a full name; an empty remainder is "Regular".
///
/// Only the first occurrence of the family name is removed, so
/// "Noto Sans" in family "Noto" yields "Sans".
pub fn derive_variation_label(full_name: &str, family: &str) -> String {
    let stripped = if family.is_empty() {
        full_name.to_string()
    } else {
        full_name.replacen(family, "", 1)
    };
    let label = stripped.trim();
    if label.is_empty() {
        REGULAR.to_string()
    } else {
        label.to_string()
    }
}

/// A family and its ordered variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamilyGroup {
    family_name: String,
    variants: Vec<FontVariant>,
}

impl FontFamilyGroup {
    /// Build a group, ordering variants "Regular" first, then by label.
    ///
    /// Variants repeating an earlier full name are dropped.
    pub fn new(family_name: impl Into<String>, variants: Vec<FontVariant>) -> Self {
        let mut variants = variants;
        variants.sort_by(|a, b| {
            (!a.is_regular(), a.variation_label()).cmp(&(!b.is_regular(), b.variation_label()))
        });
        let mut seen = std::collections::HashSet::new();
        variants.retain(|v| seen.insert(v.full_name.clone()));
        Self {
            family_name: family_name.into(),
            variants,
        }
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn variants(&self) -> &[FontVariant] {
        &self.variants
    }

    /// The variant selected by default when the family is committed.
    pub fn default_variant(&self) -> Option<&FontVariant> {
        self.variants.first()
    }

    pub fn variant_position(&self, full_name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.full_name == full_name)
    }
}

/// Ordered, read-only set of font families available to one widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<FontFamilyGroup>,
}

impl Catalog {
    /// Group raw records by family and order everything.
    ///
    /// Groups are ordered lexicographically by family name. Records with an
    /// empty family name are skipped.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawFontRecord>,
    {
        let mut by_family: BTreeMap<String, Vec<FontVariant>> = BTreeMap::new();
        for record in records {
            if record.family.is_empty() {
                log::debug!("Skipping font record without family: {:?}", record.full_name);
                continue;
            }
            by_family
                .entry(record.family.clone())
                .or_default()
                .push(FontVariant::from_record(record));
        }

        let groups = by_family
            .into_iter()
            .map(|(family, variants)| FontFamilyGroup::new(family, variants))
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[FontFamilyGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&FontFamilyGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of variants across every family.
    pub fn variant_count(&self) -> usize {
        self.groups.iter().map(|g| g.variants.len()).sum()
    }

    pub fn variants(&self) -> impl Iterator<Item = &FontVariant> {
        self.groups.iter().flat_map(|g| g.variants.iter())
    }

    /// Index of the family whose name equals `name` exactly.
    pub fn family_index(&self, name: &str) -> Option<usize> {
        self.groups
            .binary_search_by(|g| g.family_name.as_str().cmp(name))
            .ok()
    }

    /// Index of the family whose name equals `name` ignoring case.
    ///
    /// An exact-case match wins over a case-folded one.
    pub fn family_index_ignore_case(&self, name: &str) -> Option<usize> {
        if let Some(index) = self.family_index(name) {
            return Some(index);
        }
        let lower = name.to_lowercase();
        self.groups
            .iter()
            .position(|g| g.family_name.to_lowercase() == lower)
    }

    /// Locate a variant by full name: `(family index, variant index)`.
    pub fn find_variant(&self, full_name: &str) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.variant_position(full_name).map(|vi| (gi, vi))
        })
    }

    pub fn variant(&self, family: usize, variant: usize) -> Option<&FontVariant> {
        self.groups.get(family)?.variants.get(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(family: &str, full: &str) -> RawFontRecord {
        RawFontRecord::new(family, full, full.replace(' ', "-"))
    }

    #[test]
    fn test_label_derivation() {
        assert_eq!(derive_variation_label("Arial", "Arial"), "Regular");
        assert_eq!(derive_variation_label("Arial Bold", "Arial"), "Bold");
        assert_eq!(derive_variation_label("Arial  Bold Italic ", "Arial"), "Bold Italic");
        assert_eq!(derive_variation_label("Helvetica Neue", "Arial"), "Helvetica Neue");
    }

    #[test]
    fn test_regular_sorts_first() {
        let catalog = Catalog::from_records(vec![
            record("Georgia", "Georgia Italic"),
            record("Georgia", "Georgia Bold"),
            record("Georgia", "Georgia"),
        ]);
        let labels: Vec<_> = catalog.groups()[0]
            .variants()
            .iter()
            .map(FontVariant::variation_label)
            .collect();
        assert_eq!(labels, vec!["Regular", "Bold", "Italic"]);
    }

    #[test]
    fn test_groups_sorted_by_family() {
        let catalog = Catalog::from_records(vec![
            record("Verdana", "Verdana"),
            record("Arial", "Arial"),
            record("Georgia", "Georgia"),
        ]);
        let names: Vec<_> = catalog.groups().iter().map(|g| g.family_name()).collect();
        assert_eq!(names, vec!["Arial", "Georgia", "Verdana"]);
    }

    #[test]
    fn test_duplicate_full_names_dropped() {
        let catalog = Catalog::from_records(vec![
            record("Arial", "Arial"),
            record("Arial", "Arial"),
            record("Arial", "Arial Bold"),
        ]);
        assert_eq!(catalog.variant_count(), 2);
    }

    #[test]
    fn test_empty_family_skipped() {
        let catalog = Catalog::from_records(vec![record("", "Mystery")]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::from_records(vec![
            record("Arial", "Arial"),
            record("Arial", "Arial Bold"),
            record("Georgia", "Georgia"),
        ]);
        assert_eq!(catalog.family_index("Georgia"), Some(1));
        assert_eq!(catalog.family_index("georgia"), None);
        assert_eq!(catalog.family_index_ignore_case("georgia"), Some(1));
        assert_eq!(catalog.find_variant("Arial Bold"), Some((0, 1)));
        assert_eq!(catalog.find_variant("Arial Black"), None);
        assert_eq!(catalog.variant(0, 1).map(FontVariant::family), Some("Arial"));
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{"family":"Arial","fullName":"Arial Bold","postscriptName":"Arial-BoldMT"}"#;
        let record: RawFontRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name, "Arial Bold");
        assert_eq!(record.postscript_name, "Arial-BoldMT");
    }
}
