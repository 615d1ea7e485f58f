//! JSON Schema validation for catalog files.
//!
//! The bundled schema describes the `category -> item -> descriptor` shape the
//! sidebar consumes. Callers may point at a different schema file; either way
//! the schema is compiled once and every violation is reported together.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// Schema for node catalogs, compiled into the binary.
pub const BUNDLED_CATALOG_SCHEMA: &str = include_str!("../schema/node_catalog.schema.json");

/// Compiled catalog schema.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(BUNDLED_CATALOG_SCHEMA).context("parsing bundled catalog schema")?;
        Self::compile(&raw, "bundled catalog schema")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&raw, &path.display().to_string())
    }

    fn compile(raw: &Value, label: &str) -> Result<Self> {
        let compiled =
            JSONSchema::compile(raw).map_err(|err| anyhow!("compiling {label}: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate a catalog document, listing every violation on failure.
    pub fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog failed schema validation:\n{}", details);
        }
        Ok(())
    }
}
