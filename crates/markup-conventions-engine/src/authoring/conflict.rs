use crate::conventions::{Convention, DelimiterPair};
use crate::registry::ConventionRegistry;

/// Every built-in or custom convention using exactly `pair`.
///
/// More than one match only happens if the store was edited around the
/// authoring checks.
pub fn find_conflicts<'r>(
    pair: &DelimiterPair,
    registry: &'r ConventionRegistry,
) -> Vec<&'r Convention> {
    registry.iter().filter(|c| c.delimiters == *pair).collect()
}

/// Like [`find_conflicts`], ignoring the convention stored under `key`.
/// Used when an existing convention is edited and keeps its own pair.
pub fn find_conflicts_excluding<'r>(
    pair: &DelimiterPair,
    registry: &'r ConventionRegistry,
    key: &str,
) -> Vec<&'r Convention> {
    find_conflicts(pair, registry)
        .into_iter()
        .filter(|c| c.key != key)
        .collect()
}
