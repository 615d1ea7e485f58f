//! Sidebar core for node-based flow builders.
//!
//! Loads a catalog of draggable node templates, narrows it by search text or
//! by the edge the user is dragging, and lays the result out as the
//! "Components" and "Experimental" sections a sidebar renders.

pub mod catalog;
pub mod config;
pub mod drag;
pub mod filter;
pub mod schema_loader;
pub mod sidebar;
pub mod sort;

pub use catalog::{Catalog, Category, ItemDescriptor, load_catalog_from_path, parse_catalog};
pub use config::SidebarConfig;
pub use drag::{DRAG_FORMAT, DragPayload, remove_count_from_string};
pub use filter::{
    AllowedTypes, EdgeConstraint, compute_visible_catalog, filter_by_edge, filter_by_text,
    parse_edge_constraints,
};
pub use schema_loader::CatalogSchema;
pub use sidebar::{FilterMode, ItemTile, SectionView, Sidebar, SidebarView};
pub use sort::{
    collate, partition_categories, sensitive_sort, sort_category_keys,
    sort_items_by_display_name, sort_keys, sorted_items,
};

/// Split a comma and/or whitespace separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_accepts_mixed_separators() {
        assert_eq!(split_list("a, b  c,,d"), vec!["a", "b", "c", "d"]);
        assert!(split_list(" ,, ").is_empty());
    }
}
