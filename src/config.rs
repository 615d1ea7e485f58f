//! Sidebar configuration.
//!
//! Settings come from an optional JSON file (explicit path or
//! `NODESHELF_CONFIG`) and are then widened by environment overrides. Missing
//! fields fall back to the defaults the application ships with.

use crate::split_list;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_CONFIG_PATH: &str = "NODESHELF_CONFIG";
pub const ENV_PRIORITY_CATEGORIES: &str = "NODESHELF_PRIORITY_CATEGORIES";

/// Categories shown under "Components", in display order.
pub const DEFAULT_PRIORITY_CATEGORIES: &[&str] = &[
    "saved_components",
    "inputs",
    "outputs",
    "prompts",
    "data",
    "prompt",
    "models",
    "helpers",
    "vectorstores",
    "embeddings",
];

/// Placeholder text the search box treats as "no query" when focused.
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    pub priority_categories: Vec<String>,
    pub search_placeholder: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            priority_categories: DEFAULT_PRIORITY_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
        }
    }
}

impl SidebarConfig {
    /// Read a config file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading sidebar config {}", path.display()))?;
        let config: SidebarConfig = serde_json::from_str(&data)
            .with_context(|| format!("parsing sidebar config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating sidebar config {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the effective config: `explicit` path, else `NODESHELF_CONFIG`,
    /// else defaults; then apply `NODESHELF_PRIORITY_CATEGORIES`.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env_non_empty(ENV_CONFIG_PATH).map(PathBuf::from));
        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if let Some(raw) = env_non_empty(ENV_PRIORITY_CATEGORIES) {
            config.override_priority(&raw);
        }
        debug!(
            priority = ?config.priority_categories,
            "resolved sidebar config"
        );
        Ok(config)
    }

    /// Replace the priority list with a comma or whitespace separated list.
    /// A list with no entries leaves the current value alone.
    pub fn override_priority(&mut self, raw: &str) {
        let categories = split_list(raw);
        if !categories.is_empty() {
            self.priority_categories = categories;
        }
    }

    fn validate(&self) -> Result<()> {
        if self
            .priority_categories
            .iter()
            .any(|category| category.trim().is_empty())
        {
            bail!("priority_categories must not contain empty entries");
        }
        let mut seen = std::collections::BTreeSet::new();
        for category in &self.priority_categories {
            if !seen.insert(category.as_str()) {
                bail!("duplicate priority category {category}");
            }
        }
        Ok(())
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
