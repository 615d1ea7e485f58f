//! Sidebar filter lifecycle and section view.
//!
//! `Sidebar` owns the catalog snapshot, the active filter and the last visible
//! catalog. Search and edge filtering are mutually exclusive here: starting
//! one clears the other. Every input change funnels through
//! [`compute_visible_catalog`], so there is exactly one place the visible
//! catalog is derived.

use crate::catalog::{Catalog, ItemDescriptor};
use crate::config::SidebarConfig;
use crate::drag::remove_count_from_string;
use crate::filter::{EdgeConstraint, compute_visible_catalog};
use crate::sort::{partition_categories, sort_keys, sorted_items};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Idle,
    Searching(String),
    EdgeFiltered(Vec<EdgeConstraint>),
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Idle => "idle",
            FilterMode::Searching(_) => "searching",
            FilterMode::EdgeFiltered(_) => "edge-filtered",
        }
    }

    pub fn query(&self) -> &str {
        match self {
            FilterMode::Searching(query) => query.as_str(),
            FilterMode::Idle | FilterMode::EdgeFiltered(_) => "",
        }
    }

    pub fn constraints(&self) -> &[EdgeConstraint] {
        match self {
            FilterMode::EdgeFiltered(constraints) => constraints.as_slice(),
            FilterMode::Idle | FilterMode::Searching(_) => &[],
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, FilterMode::Idle)
    }
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    config: SidebarConfig,
    catalog: Catalog,
    mode: FilterMode,
    visible: Catalog,
    expanded: bool,
}

impl Sidebar {
    pub fn new(catalog: Catalog, config: SidebarConfig) -> Self {
        report_errored_items(&catalog);
        Self {
            config,
            visible: catalog.clone(),
            catalog,
            mode: FilterMode::Idle,
            expanded: true,
        }
    }

    pub fn mode(&self) -> &FilterMode {
        &self.mode
    }

    pub fn search_text(&self) -> &str {
        self.mode.query()
    }

    pub fn edge_filter(&self) -> &[EdgeConstraint] {
        self.mode.constraints()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catalog after the active filter.
    pub fn visible(&self) -> &Catalog {
        &self.visible
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Typing in the search box. A non-empty query drops any edge filter.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.mode = if query.is_empty() {
            FilterMode::Idle
        } else {
            FilterMode::Searching(query)
        };
        self.recompute();
    }

    /// New constraints from the canvas. A non-empty list replaces any query;
    /// an empty list only returns to idle when edge filtering was active.
    pub fn set_edge_filter(&mut self, constraints: Vec<EdgeConstraint>) {
        if !constraints.is_empty() {
            self.mode = FilterMode::EdgeFiltered(constraints);
        } else if matches!(self.mode, FilterMode::EdgeFiltered(_)) {
            self.mode = FilterMode::Idle;
        }
        self.recompute();
    }

    /// The clear button next to the search box.
    pub fn clear_search(&mut self) {
        if matches!(self.mode, FilterMode::Searching(_)) {
            self.mode = FilterMode::Idle;
            self.recompute();
        }
    }

    /// Focusing the search box resets both filters while the box holds no
    /// real query (empty or the placeholder text).
    pub fn focus_search(&mut self) {
        let query = self.mode.query();
        if query.is_empty() || query == self.config.search_placeholder {
            self.mode = FilterMode::Idle;
            self.recompute();
        }
    }

    /// Swap in a reloaded catalog and re-run the active filter on it.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        report_errored_items(&catalog);
        self.catalog = catalog;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible =
            compute_visible_catalog(&self.catalog, self.mode.query(), self.mode.constraints());
        debug!(mode = self.mode.as_str(), "sidebar filter updated");
    }

    /// Section layout for the current state.
    pub fn view(&self) -> SidebarView {
        let priority = &self.config.priority_categories;
        let order = sort_keys(priority);
        let (mut listed, mut rest) =
            partition_categories(self.visible.category_keys().cloned(), priority);
        listed.sort_by(|a, b| order(a.as_str(), b.as_str()));
        rest.sort_by(|a, b| order(a.as_str(), b.as_str()));

        let experimental = if self.expanded {
            self.sections(&rest)
        } else {
            Vec::new()
        };

        SidebarView {
            expanded: self.expanded,
            mode: self.mode.as_str(),
            search: self.mode.query().to_string(),
            default_open: self.mode.is_active(),
            components: self.sections(&listed),
            experimental,
        }
    }

    fn sections(&self, keys: &[String]) -> Vec<SectionView> {
        keys.iter()
            .filter_map(|category| {
                let items = self.visible.category(category)?;
                if items.is_empty() {
                    return None;
                }
                Some(SectionView {
                    category: category.clone(),
                    items: sorted_items(items)
                        .into_iter()
                        .map(|(key, item)| ItemTile::new(key, item))
                        .collect(),
                })
            })
            .collect()
    }
}

fn report_errored_items(catalog: &Catalog) {
    let errors = catalog.errored_items();
    if !errors.is_empty() {
        warn!(components = ?errors, "Components with errors");
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub expanded: bool,
    pub mode: &'static str,
    pub search: String,
    /// Sections start open while a filter is active.
    pub default_open: bool,
    pub components: Vec<SectionView>,
    pub experimental: Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub category: String,
    pub items: Vec<ItemTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTile {
    pub key: String,
    pub display_name: String,
    pub official: bool,
    pub error: bool,
    pub drag_type: String,
}

impl ItemTile {
    fn new(key: &str, item: &ItemDescriptor) -> Self {
        Self {
            key: key.to_string(),
            display_name: item
                .display_name
                .clone()
                .unwrap_or_else(|| key.to_string()),
            official: item.is_official(),
            error: item.has_error(),
            drag_type: remove_count_from_string(key).to_string(),
        }
    }
}

impl SidebarView {
    pub fn item_keys(&self) -> Vec<&str> {
        self.components
            .iter()
            .chain(&self.experimental)
            .flat_map(|section| section.items.iter().map(|tile| tile.key.as_str()))
            .collect()
    }
}

impl fmt::Display for SidebarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section_group(f, "Components", &self.components)?;
        if self.expanded {
            write_section_group(f, "Experimental", &self.experimental)?;
        }
        Ok(())
    }
}

fn write_section_group(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    sections: &[SectionView],
) -> fmt::Result {
    writeln!(f, "{title}")?;
    for section in sections {
        writeln!(f, "  {}", section.category)?;
        for tile in &section.items {
            let mut flags = Vec::new();
            if !tile.official {
                flags.push("community");
            }
            if tile.error {
                flags.push("error");
            }
            if flags.is_empty() {
                writeln!(f, "    - {} ({})", tile.display_name, tile.key)?;
            } else {
                writeln!(
                    f,
                    "    - {} ({}) [{}]",
                    tile.display_name,
                    tile.key,
                    flags.join(", ")
                )?;
            }
        }
    }
    Ok(())
}
