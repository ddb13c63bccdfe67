use std::cmp::Reverse;

use crate::conventions::{Convention, builtins};
use crate::io::CustomConventions;

/// The conventions active for one parse call.
///
/// An immutable snapshot: built-ins followed by custom entries (in key order),
/// then stably sorted by opening length, longest first. Longer delimiters claim
/// their spans before a shorter delimiter that is a prefix of them can.
#[derive(Debug, Clone)]
pub struct ConventionRegistry {
    conventions: Vec<Convention>,
}

impl ConventionRegistry {
    /// Built-ins only.
    pub fn builtin() -> Self {
        Self::from_conventions(builtins())
    }

    /// Built-ins plus every valid custom record. Invalid records, and records
    /// stored under a key other than their own, are skipped.
    pub fn with_custom(custom: &CustomConventions) -> Self {
        let mut conventions = builtins();
        for (key, record) in custom {
            if record.key != *key {
                log::warn!(
                    "Skipping custom convention {key:?}: record names key {:?}",
                    record.key
                );
                continue;
            }
            match Convention::try_from(record.clone()) {
                Ok(convention) => conventions.push(convention),
                Err(e) => log::warn!("Skipping custom convention {key:?}: {e}"),
            }
        }
        log::debug!(
            "Loaded convention registry: {} built-in, {} custom",
            crate::conventions::BUILTIN_KEYS.len(),
            conventions.len() - crate::conventions::BUILTIN_KEYS.len()
        );
        Self::from_conventions(conventions)
    }

    /// Uses the given conventions as-is, ordered longest opening first.
    pub fn from_conventions(conventions: impl IntoIterator<Item = Convention>) -> Self {
        let mut conventions: Vec<_> = conventions.into_iter().collect();
        conventions.sort_by_key(|c| Reverse(c.opening().len()));
        Self { conventions }
    }

    /// Conventions in matching order.
    pub fn iter(&self) -> std::slice::Iter<'_, Convention> {
        self.conventions.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Convention> {
        self.conventions.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }
}

impl Default for ConventionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a ConventionRegistry {
    type Item = &'a Convention;
    type IntoIter = std::slice::Iter<'a, Convention>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
