//! Node-template catalog wiring.
//!
//! The catalog is the nested `category -> item -> descriptor` map the sidebar
//! renders. Types here mirror the JSON the application serves; callers load a
//! snapshot with `load_catalog_from_path` (or `parse_catalog`) and hand it to
//! the filter engine, which never mutates it.

pub mod model;

pub use model::{Catalog, Category, ItemDescriptor, load_catalog_from_path, parse_catalog};

/// Relative path to the catalog fixture shipped with the repository.
pub const SAMPLE_CATALOG_PATH: &str = "catalogs/sample_catalog.json";
