//! Edge constraints derived from a dragged connection.
//!
//! When the user pulls an edge out of a node handle, the canvas publishes the
//! families and item keys that could accept it. Each constraint names one
//! family and a comma-joined list of compatible item keys.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConstraint {
    pub family: String,
    #[serde(rename = "type", default)]
    pub types: String,
}

/// Which items of a matched family stay visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedTypes {
    Any,
    Only(BTreeSet<String>),
}

impl AllowedTypes {
    pub fn permits(&self, item_key: &str) -> bool {
        match self {
            AllowedTypes::Any => true,
            AllowedTypes::Only(keys) => keys.contains(item_key),
        }
    }
}

impl EdgeConstraint {
    pub fn new(family: impl Into<String>, types: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            types: types.into(),
        }
    }

    /// Split `type` into item keys.
    ///
    /// Tokens lose leading whitespace only. Empty tokens are wildcards unless
    /// at least one non-empty token is present, so `""`, `" "` and `","` all
    /// allow the whole family while `" a, b,"` allows exactly `a` and `b`.
    pub fn allowed_types(&self) -> AllowedTypes {
        let tokens: BTreeSet<String> = self
            .types
            .split(',')
            .map(|token| token.trim_start().to_string())
            .collect();
        if tokens.iter().any(|token| !token.is_empty()) {
            AllowedTypes::Only(tokens)
        } else {
            AllowedTypes::Any
        }
    }
}

impl FromStr for EdgeConstraint {
    type Err = anyhow::Error;

    /// Parses `family=type1,type2`; a bare `family` allows every item.
    fn from_str(value: &str) -> Result<Self> {
        let (family, types) = match value.split_once('=') {
            Some((family, types)) => (family.trim(), types),
            None => (value.trim(), ""),
        };
        if family.is_empty() {
            bail!("edge constraint '{value}' is missing a family");
        }
        Ok(Self::new(family, types))
    }
}

/// Parse edge constraints from a JSON array, a single object, or one JSON
/// object per line. Blank input yields no constraints.
pub fn parse_edge_constraints(input: &str) -> Result<Vec<EdgeConstraint>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .context("Unable to parse JSON array of edge constraints"),
            Value::Object(_) => serde_json::from_value(value)
                .map(|constraint| vec![constraint])
                .context("Unable to parse edge constraint"),
            _ => Err(anyhow!("Unsupported JSON input; expected object or array")),
        };
    }

    let mut constraints = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let constraint: EdgeConstraint = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse edge constraint from line {}", idx + 1))?;
        constraints.push(constraint);
    }
    Ok(constraints)
}
