//! Drag payloads for dropping a sidebar item onto the canvas.

use crate::catalog::ItemDescriptor;
use crate::sort::is_counter_word;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Transfer format name the canvas reads dropped nodes from.
pub const DRAG_FORMAT: &str = "nodedata";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<ItemDescriptor>,
}

impl DragPayload {
    /// Payload for one catalog item. Duplicate keys such as `"Prompt (2)"`
    /// resolve to their base node type.
    pub fn for_item(item_key: &str, item: &ItemDescriptor) -> Self {
        Self {
            node_type: remove_count_from_string(item_key).to_string(),
            node: Some(item.clone()),
        }
    }

    /// Serialized form stored under [`DRAG_FORMAT`].
    pub fn to_transfer_data(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing drag payload")
    }

    pub fn from_transfer_data(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("parsing drag payload")
    }
}

/// Strip a trailing `(word)` counter such as ` (2)` or ` (beta)`, along with
/// the whitespace around it.
pub fn remove_count_from_string(value: &str) -> &str {
    let trimmed = value.trim_end();
    let Some(inner) = trimmed.strip_suffix(')') else {
        return value;
    };
    let Some(open) = inner.rfind('(') else {
        return value;
    };
    if !is_counter_word(&inner[open + 1..]) {
        return value;
    }
    inner[..open].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_removed() {
        assert_eq!(remove_count_from_string("ChatInput (2)"), "ChatInput");
        assert_eq!(remove_count_from_string("ChatInput(12) "), "ChatInput");
        assert_eq!(remove_count_from_string("ChatInput"), "ChatInput");
        assert_eq!(remove_count_from_string("()"), "()");
    }

    #[test]
    fn word_counters_are_removed_like_sort_reads_them() {
        assert_eq!(remove_count_from_string("Mode (beta)"), "Mode");
        assert_eq!(remove_count_from_string("Tool (v_2) "), "Tool");
        assert_eq!(remove_count_from_string("Tool (1-2)"), "Tool (1-2)");
        assert_eq!(remove_count_from_string("Tool (!)"), "Tool (!)");
    }

    #[test]
    fn payload_uses_base_type_and_round_trips() {
        let item = ItemDescriptor::named("Prompt");
        let payload = DragPayload::for_item("Prompt (3)", &item);
        assert_eq!(payload.node_type, "Prompt");
        let data = payload.to_transfer_data().unwrap();
        assert!(data.contains(r#""type":"Prompt""#));
        assert_eq!(DragPayload::from_transfer_data(&data).unwrap(), payload);
    }
}
