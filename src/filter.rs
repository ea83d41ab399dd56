//! Preview list filtering.
//!
//! Computes which families are visible for a query. Matching is always
//! case-insensitive. Contains-matching drives the list while typing;
//! exact matching is used when validating text at commit time.

use font_select_fonts::Catalog;

/// Indices of the families whose name matches `query`, in catalog order.
///
/// An empty query matches everything in contains mode. Exact mode yields at
/// most one family, preferring an exact-case match.
pub fn filter(catalog: &Catalog, query: &str, exact_match: bool) -> Vec<usize> {
    if exact_match {
        return catalog
            .family_index_ignore_case(query)
            .into_iter()
            .collect();
    }

    if query.is_empty() {
        return (0..catalog.len()).collect();
    }

    let query_lower = query.to_lowercase();
    catalog
        .groups()
        .iter()
        .enumerate()
        .filter(|(_, group)| group.family_name().to_lowercase().contains(&query_lower))
        .map(|(index, _)| index)
        .collect()
}
