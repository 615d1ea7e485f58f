//! Deterministic ordering for sidebar categories and items.
//!
//! Comparators follow the `Fn(&str, &str) -> Ordering` contract so callers can
//! plug in their own collation; [`sensitive_sort`] is the default.

use crate::catalog::{Category, ItemDescriptor};
use std::cmp::Ordering;

/// Display-name collation used for item tiles.
///
/// Every name is read as a `(stem, counter)` pair: `"Chroma (10)"` splits into
/// `"Chroma"` and `"10"`, a name without a counter is all stem. Stems compare
/// through [`collate`]; on equal stems a missing counter comes first, then
/// numeric counters by value, then word counters. The full name breaks any
/// remaining tie, so the order is total.
pub fn sensitive_sort(a: &str, b: &str) -> Ordering {
    let (stem_a, count_a) = counter_key(a);
    let (stem_b, count_b) = counter_key(b);
    collate(stem_a, stem_b)
        .then_with(|| compare_counter(count_a, count_b))
        .then_with(|| collate(a, b))
}

/// Case-insensitive primary order, lowercase before uppercase on ties, then
/// raw bytes so distinct strings never compare equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary
        .then_with(|| case_flags(a).cmp(case_flags(b)))
        .then_with(|| a.cmp(b))
}

fn case_flags(value: &str) -> impl Iterator<Item = bool> + '_ {
    value.chars().map(|c| !c.is_lowercase())
}

/// Word characters allowed inside a trailing `(...)` counter: ASCII letters,
/// digits and `_`.
pub(crate) fn is_counter_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn counter_key(name: &str) -> (&str, Option<&str>) {
    let split = name
        .strip_suffix(')')
        .and_then(|inner| inner.rsplit_once(" ("))
        .filter(|(stem, counter)| !stem.is_empty() && is_counter_word(counter));
    match split {
        Some((stem, counter)) => (stem, Some(counter)),
        None => (name, None),
    }
}

fn compare_counter(a: Option<&str>, b: Option<&str>) -> Ordering {
    let rank = |counter: Option<&str>| match counter {
        None => 0,
        Some(c) if c.bytes().all(|byte| byte.is_ascii_digit()) => 1,
        Some(_) => 2,
    };
    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (Some(x), Some(y)) if rank(a) == 1 => compare_digits(x, y).then_with(|| collate(x, y)),
        (Some(x), Some(y)) => collate(x, y),
        _ => Ordering::Equal,
    })
}

// Numeric order on digit strings of any length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Category comparator: position in `priority` first, unlisted keys after
/// listed ones, then [`sensitive_sort`].
pub fn sort_keys(priority: &[String]) -> impl Fn(&str, &str) -> Ordering + '_ {
    move |a: &str, b: &str| {
        let rank_a = priority.iter().position(|p| p == a);
        let rank_b = priority.iter().position(|p| p == b);
        match (rank_a, rank_b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => sensitive_sort(a, b),
        }
    }
}

/// Split category keys into the priority section and everything else,
/// preserving input order within each half.
pub fn partition_categories<I, S>(keys: I, priority: &[String]) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keys.into_iter()
        .map(Into::<String>::into)
        .partition(|key| priority.iter().any(|p| p == key))
}

/// Priority keys sorted by `cmp`, followed by the remaining keys sorted by
/// `cmp`.
pub fn sort_category_keys<I, S, F>(keys: I, priority: &[String], cmp: F) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&str, &str) -> Ordering,
{
    let (mut listed, mut rest) = partition_categories(keys, priority);
    listed.sort_by(|a, b| cmp(a.as_str(), b.as_str()));
    rest.sort_by(|a, b| cmp(a.as_str(), b.as_str()));
    listed.extend(rest);
    listed
}

/// Sort item keys by display name through `cmp`.
///
/// Keys without a display name sort by the key itself; equal names fall back
/// to key order.
pub fn sort_items_by_display_name<I, S, N, F>(keys: I, display_name_of: N, cmp: F) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    N: Fn(&str) -> Option<String>,
    F: Fn(&str, &str) -> Ordering,
{
    let mut entries: Vec<(String, String)> = keys
        .into_iter()
        .map(|key| {
            let key: String = key.into();
            let name = display_name_of(key.as_str()).unwrap_or_else(|| key.clone());
            (name, key)
        })
        .collect();
    entries.sort_by(|(name_a, key_a), (name_b, key_b)| {
        cmp(name_a.as_str(), name_b.as_str()).then_with(|| key_a.cmp(key_b))
    });
    entries.into_iter().map(|(_, key)| key).collect()
}

/// Items of one category in tile order.
pub fn sorted_items(items: &Category) -> Vec<(&String, &ItemDescriptor)> {
    let order = sort_items_by_display_name(
        items.keys().cloned(),
        |key| items.get(key).and_then(|item| item.display_name.clone()),
        sensitive_sort,
    );
    order
        .into_iter()
        .filter_map(|key| items.get_key_value(key.as_str()))
        .collect()
}
