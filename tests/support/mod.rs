#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use nodeshelf::{Catalog, ItemDescriptor, load_catalog_from_path};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn sample_catalog_path() -> PathBuf {
    repo_root().join(nodeshelf::catalog::SAMPLE_CATALOG_PATH)
}

pub fn sample_catalog() -> Result<Catalog> {
    load_catalog_from_path(&sample_catalog_path())
}

// The two-category catalog used in the filter scenarios.
pub fn small_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert_item("A", "foo", ItemDescriptor::named("Foo Node"));
    catalog.insert_item("A", "bar", ItemDescriptor::named("Bar"));
    catalog.insert_item("B", "baz", ItemDescriptor::named("Baz"));
    catalog
}

pub fn item_keys(catalog: &Catalog, category: &str) -> Vec<String> {
    catalog
        .category(category)
        .map(|items| items.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn nodeshelf_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nodeshelf"));
    cmd.env_remove("RUST_LOG")
        .env_remove("NODESHELF_CONFIG")
        .env_remove("NODESHELF_PRIORITY_CATEGORIES");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {:?}\nstdout: {}\nstderr: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
