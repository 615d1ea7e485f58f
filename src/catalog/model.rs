use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Items of a single category keyed by item key.
pub type Category = BTreeMap<String, ItemDescriptor>;

/// Nested `category -> item -> descriptor` map of available node templates.
///
/// Backed by `BTreeMap`s so iteration is stable; display order is still the
/// job of the helpers in [`crate::sort`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: BTreeMap<String, Category>,
}

/// One draggable node template.
///
/// Only the fields the sidebar reads are typed; everything else (template,
/// description, base classes, ...) is kept verbatim in `payload`. An explicit
/// `"error": null` survives a round trip; a null `display_name` or `official`
/// reads as absent and is not written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

// Keeps a present `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ItemDescriptor {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }

    /// Items are official unless they explicitly say otherwise.
    pub fn is_official(&self) -> bool {
        self.official != Some(false)
    }

    /// Truthiness of the `error` field, matching how the frontend flags tiles.
    pub fn has_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a whole category.
    pub fn insert_category(&mut self, key: impl Into<String>, items: Category) {
        self.categories.insert(key.into(), items);
    }

    /// Insert a single item, creating its category on demand.
    pub fn insert_item(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        item: ItemDescriptor,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), item);
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &String> {
        self.categories.keys()
    }

    pub fn item(&self, category: &str, key: &str) -> Option<&ItemDescriptor> {
        self.categories.get(category)?.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Item keys whose descriptor carries an error, sorted and deduplicated
    /// across categories.
    pub fn errored_items(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .categories
            .values()
            .flat_map(|items| items.iter())
            .filter(|(_, item)| item.has_error())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

impl From<BTreeMap<String, Category>> for Catalog {
    fn from(categories: BTreeMap<String, Category>) -> Self {
        Self { categories }
    }
}

impl FromIterator<(String, Category)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Category)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(input: &str) -> Result<Catalog> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No catalog JSON provided");
    }
    let value: Value = serde_json::from_str(trimmed).context("parsing catalog JSON")?;
    if !value.is_object() {
        bail!("Unsupported catalog JSON; expected an object of categories");
    }
    serde_json::from_value(value).context("Unable to parse node catalog")
}

/// Read and parse a catalog file.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("loading catalog {}", path.display()))
}
