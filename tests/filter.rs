// Filter engine guard rails: text search, edge constraints, composition.
mod support;

use anyhow::Result;
use nodeshelf::{
    Catalog, EdgeConstraint, ItemDescriptor, compute_visible_catalog, filter_by_edge,
    filter_by_text,
};
use pretty_assertions::assert_eq;

use support::{item_keys, sample_catalog, small_catalog};

fn assert_subset(filtered: &Catalog, original: &Catalog) {
    let filtered_keys: Vec<_> = filtered.category_keys().collect();
    let original_keys: Vec<_> = original.category_keys().collect();
    assert_eq!(filtered_keys, original_keys, "category keys must carry over");
    for (family, items) in filtered.categories() {
        for (key, item) in items {
            assert_eq!(
                original.item(family, key),
                Some(item),
                "{family}/{key} must come from the original catalog"
            );
        }
    }
}

#[test]
fn empty_query_returns_catalog_unchanged() -> Result<()> {
    let catalog = sample_catalog()?;
    assert_eq!(filter_by_text(&catalog, ""), catalog);
    assert_eq!(compute_visible_catalog(&catalog, "", &[]), catalog);
    Ok(())
}

#[test]
fn search_scenario_keeps_matching_keys_in_every_category() {
    let result = filter_by_text(&small_catalog(), "ba");
    assert_eq!(item_keys(&result, "A"), vec!["bar"]);
    assert_eq!(item_keys(&result, "B"), vec!["baz"]);
    assert_subset(&result, &small_catalog());
}

#[test]
fn search_matches_exactly_the_items_containing_the_query() -> Result<()> {
    let catalog = sample_catalog()?;
    for query in ["chat", "MODEL", "o", "(2", "zzz"] {
        let needle = query.to_lowercase();
        let result = filter_by_text(&catalog, query);
        assert_subset(&result, &catalog);
        for (family, items) in catalog.categories() {
            for (key, item) in items {
                let expected = key.to_lowercase().contains(&needle)
                    || item
                        .display_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle));
                let kept = result.item(family, key).is_some();
                assert_eq!(kept, expected, "query {query:?} on {family}/{key}");
            }
        }
    }
    Ok(())
}

#[test]
fn search_on_display_name_only() -> Result<()> {
    let catalog = sample_catalog()?;
    // The key is "SearchAPI", so only the display name contains the space.
    let result = filter_by_text(&catalog, "search api");
    assert_eq!(item_keys(&result, "tools"), vec!["SearchAPI"]);
    assert!(item_keys(&result, "models").is_empty());
    Ok(())
}

#[test]
fn edge_constraint_trims_tokens_and_ignores_trailing_empty() {
    let mut catalog = Catalog::new();
    for key in ["a", "b", "c"] {
        catalog.insert_item("X", key, ItemDescriptor::named(key.to_uppercase()));
    }
    let result = filter_by_edge(&catalog, &[EdgeConstraint::new("X", " a, b,")]);
    assert_eq!(item_keys(&result, "X"), vec!["a", "b"]);
}

#[test]
fn empty_type_keeps_the_whole_family() -> Result<()> {
    let catalog = sample_catalog()?;
    let result = filter_by_edge(&catalog, &[EdgeConstraint::new("models", "")]);
    assert_eq!(
        item_keys(&result, "models"),
        item_keys(&catalog, "models")
    );
    Ok(())
}

#[test]
fn unmatched_families_come_back_empty() -> Result<()> {
    let catalog = sample_catalog()?;
    let result = filter_by_edge(
        &catalog,
        &[
            EdgeConstraint::new("models", "OpenAIModel, AnthropicModel"),
            EdgeConstraint::new("unknown_family", ""),
        ],
    );
    assert_subset(&result, &catalog);
    assert_eq!(
        item_keys(&result, "models"),
        vec!["AnthropicModel", "OpenAIModel"]
    );
    for family in ["inputs", "outputs", "tools", "vectorstores", "agents"] {
        assert!(
            item_keys(&result, family).is_empty(),
            "{family} should be emptied"
        );
    }
    assert!(result.category("unknown_family").is_none());
    Ok(())
}

#[test]
fn no_constraints_empties_every_category() -> Result<()> {
    let catalog = sample_catalog()?;
    let result = filter_by_edge(&catalog, &[]);
    assert_eq!(result.item_count(), 0);
    assert_eq!(
        result.category_keys().count(),
        catalog.category_keys().count()
    );
    Ok(())
}

#[test]
fn later_constraints_for_a_family_override_earlier_ones() -> Result<()> {
    let catalog = sample_catalog()?;
    let constraints = vec![
        EdgeConstraint::new("models", "OpenAIModel"),
        EdgeConstraint::new("inputs", "ChatInput"),
        EdgeConstraint::new("models", " OllamaModel"),
    ];
    let result = filter_by_edge(&catalog, &constraints);
    assert_eq!(item_keys(&result, "models"), vec!["OllamaModel"]);
    assert_eq!(item_keys(&result, "inputs"), vec!["ChatInput"]);
    Ok(())
}

#[test]
fn composition_equals_edge_then_text() -> Result<()> {
    let catalog = sample_catalog()?;
    let constraints = vec![
        EdgeConstraint::new("models", ""),
        EdgeConstraint::new("inputs", ""),
    ];
    let composed = compute_visible_catalog(&catalog, "open", &constraints);
    assert_eq!(
        composed,
        filter_by_text(&filter_by_edge(&catalog, &constraints), "open")
    );
    assert_eq!(composed.item_count(), 1);
    assert_eq!(item_keys(&composed, "models"), vec!["OpenAIModel"]);
    Ok(())
}
