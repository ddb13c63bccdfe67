//! Shared test fixtures.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::conventions::{ConventionRecord, Effects};
use crate::engine::MarkupEngine;
use crate::io::{ConventionStore, CustomConventions, MemoryStore, StoreError};

/// A stored custom convention with the given delimiters and color string.
pub fn custom_record(key: &str, opening: &str, closing: &str, color: &str) -> ConventionRecord {
    ConventionRecord {
        key: key.to_string(),
        syntax: format!("{opening}text{closing}"),
        opening: opening.to_string(),
        closing: closing.to_string(),
        description: String::new(),
        example: format!("{opening}example{closing}"),
        color: color.to_string(),
        effects: Effects::NONE,
    }
}

pub fn custom_set(records: impl IntoIterator<Item = ConventionRecord>) -> CustomConventions {
    records.into_iter().map(|r| (r.key.clone(), r)).collect()
}

pub fn create_test_store_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

pub fn engine_with(
    records: impl IntoIterator<Item = ConventionRecord>,
) -> MarkupEngine<MemoryStore> {
    MarkupEngine::new(MemoryStore::with_conventions(custom_set(records)))
}

/// A store whose every read and write fails.
#[derive(Debug)]
pub struct FailingStore;

impl ConventionStore for FailingStore {
    fn load(&self) -> Result<CustomConventions, StoreError> {
        Err(StoreError::Read {
            path: PathBuf::from("/unavailable/conventions.json"),
            source: std::io::Error::other("store offline"),
        })
    }

    fn save(&self, _conventions: &CustomConventions) -> Result<(), StoreError> {
        Err(StoreError::Write {
            path: PathBuf::from("/unavailable/conventions.json"),
            source: std::io::Error::other("store offline"),
        })
    }
}
