//! Preview list entries.
//!
//! The preview list shows one entry per visible family. In drill-down
//! layouts the expanded family is followed by one entry per variant.

use font_select_fonts::Catalog;

/// Identifies one preview list entry by catalog position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryId {
    Family(usize),
    Variant { family: usize, variant: usize },
}

impl EntryId {
    /// Index of the family this entry belongs to.
    pub fn family(self) -> usize {
        match self {
            EntryId::Family(family) | EntryId::Variant { family, .. } => family,
        }
    }

    /// Text shown for the entry: the family name, or the variation label
    /// ("Regular", "Bold") under its family.
    pub fn display_text(self, catalog: &Catalog) -> Option<&str> {
        match self {
            EntryId::Family(family) => catalog.group(family).map(|g| g.family_name()),
            EntryId::Variant { family, variant } => {
                catalog.variant(family, variant).map(|v| v.variation_label())
            }
        }
    }

    /// Registered face the entry is rendered in. Families use their default
    /// variant.
    pub fn face_name(self, catalog: &Catalog) -> Option<&str> {
        match self {
            EntryId::Family(family) => catalog
                .group(family)
                .and_then(|g| g.default_variant())
                .map(|v| v.full_name()),
            EntryId::Variant { family, variant } => {
                catalog.variant(family, variant).map(|v| v.full_name())
            }
        }
    }
}

/// Lay out the visible entries for a set of visible families.
///
/// `expanded` names the family whose variation sub-list is revealed; it only
/// contributes entries when that family is itself visible.
pub fn layout_entries(
    catalog: &Catalog,
    visible_families: &[usize],
    expanded: Option<usize>,
) -> Vec<EntryId> {
    let mut entries = Vec::with_capacity(visible_families.len());
    for &family in visible_families {
        entries.push(EntryId::Family(family));
        if expanded == Some(family)
            && let Some(group) = catalog.group(family)
        {
            entries.extend(
                (0..group.variants().len()).map(|variant| EntryId::Variant { family, variant }),
            );
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_select_fonts::RawFontRecord;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            RawFontRecord::new("Arial", "Arial", "ArialMT"),
            RawFontRecord::new("Arial", "Arial Bold", "Arial-BoldMT"),
            RawFontRecord::new("Georgia", "Georgia", "Georgia"),
        ])
    }

    #[test]
    fn test_flat_layout() {
        let catalog = catalog();
        assert_eq!(
            layout_entries(&catalog, &[0, 1], None),
            vec![EntryId::Family(0), EntryId::Family(1)]
        );
    }

    #[test]
    fn test_expanded_family_reveals_variants() {
        let catalog = catalog();
        assert_eq!(
            layout_entries(&catalog, &[0, 1], Some(0)),
            vec![
                EntryId::Family(0),
                EntryId::Variant { family: 0, variant: 0 },
                EntryId::Variant { family: 0, variant: 1 },
                EntryId::Family(1),
            ]
        );
    }

    #[test]
    fn test_hidden_expanded_family_contributes_nothing() {
        let catalog = catalog();
        assert_eq!(
            layout_entries(&catalog, &[1], Some(0)),
            vec![EntryId::Family(1)]
        );
    }

    #[test]
    fn test_display_text() {
        let catalog = catalog();
        assert_eq!(EntryId::Family(1).display_text(&catalog), Some("Georgia"));
        assert_eq!(
            EntryId::Variant { family: 0, variant: 0 }.display_text(&catalog),
            Some("Regular")
        );
        assert_eq!(
            EntryId::Variant { family: 0, variant: 1 }.display_text(&catalog),
            Some("Bold")
        );
        assert_eq!(EntryId::Family(9).display_text(&catalog), None);
    }

    #[test]
    fn test_face_name() {
        let catalog = catalog();
        assert_eq!(EntryId::Family(0).face_name(&catalog), Some("Arial"));
        assert_eq!(
            EntryId::Variant { family: 0, variant: 1 }.face_name(&catalog),
            Some("Arial Bold")
        );
    }
}
