//! Catalog filter engine.
//!
//! Every function here is pure: it reads a catalog and builds a new one. Category
//! keys always carry over to the output (possibly with no items) so callers can
//! tell "filtered away" apart from "unknown category".

pub mod edge;

pub use edge::{AllowedTypes, EdgeConstraint, parse_edge_constraints};

use crate::catalog::{Catalog, Category, ItemDescriptor};
use tracing::debug;

/// Keep items whose key or display name contains `query`, ignoring case.
///
/// An empty query returns the catalog unchanged.
pub fn filter_by_text(catalog: &Catalog, query: &str) -> Catalog {
    if query.is_empty() {
        return catalog.clone();
    }
    let needle = query.to_lowercase();
    catalog
        .categories()
        .map(|(family, items)| {
            let kept: Category = items
                .iter()
                .filter(|(key, item)| matches_text(key, item, &needle))
                .map(|(key, item)| (key.clone(), item.clone()))
                .collect();
            (family.clone(), kept)
        })
        .collect()
}

fn matches_text(key: &str, item: &ItemDescriptor, needle: &str) -> bool {
    key.to_lowercase().contains(needle)
        || item
            .display_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// Narrow the catalog to the families and item keys an edge can connect to.
///
/// For each category the last constraint naming it wins. Categories no
/// constraint names come back empty, so an empty constraint list empties the
/// whole catalog; callers wanting "no edge filter" should not call this.
pub fn filter_by_edge(catalog: &Catalog, constraints: &[EdgeConstraint]) -> Catalog {
    catalog
        .categories()
        .map(|(family, items)| {
            let kept: Category = match constraints.iter().rev().find(|c| &c.family == family) {
                None => Category::new(),
                Some(constraint) => {
                    let allowed = constraint.allowed_types();
                    items
                        .iter()
                        .filter(|(key, _)| allowed.permits(key))
                        .map(|(key, item)| (key.clone(), item.clone()))
                        .collect()
                }
            };
            (family.clone(), kept)
        })
        .collect()
}

/// Visible catalog for the current search text and edge constraints.
///
/// Inactive inputs (empty query, no constraints) are skipped. When both are
/// active the edge filter runs first and the text search narrows its result.
pub fn compute_visible_catalog(
    catalog: &Catalog,
    query: &str,
    constraints: &[EdgeConstraint],
) -> Catalog {
    let visible = match (query.is_empty(), constraints.is_empty()) {
        (true, true) => catalog.clone(),
        (false, true) => filter_by_text(catalog, query),
        (true, false) => filter_by_edge(catalog, constraints),
        (false, false) => filter_by_text(&filter_by_edge(catalog, constraints), query),
    };
    debug!(
        query,
        constraints = constraints.len(),
        total = catalog.item_count(),
        visible = visible.item_count(),
        "recomputed visible catalog"
    );
    visible
}
