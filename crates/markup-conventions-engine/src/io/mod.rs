use crate::conventions::ConventionRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Custom conventions keyed by convention key.
pub type CustomConventions = BTreeMap<String, ConventionRecord>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read convention store at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write convention store at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode convention store at {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to encode conventions: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Key-value surface holding the custom convention collection.
///
/// Implementations must read and write the whole collection atomically: a
/// `load` never observes half of a concurrent `save`.
pub trait ConventionStore {
    fn load(&self) -> Result<CustomConventions, StoreError>;
    fn save(&self, conventions: &CustomConventions) -> Result<(), StoreError>;
}

impl<S: ConventionStore + ?Sized> ConventionStore for &S {
    fn load(&self) -> Result<CustomConventions, StoreError> {
        (**self).load()
    }

    fn save(&self, conventions: &CustomConventions) -> Result<(), StoreError> {
        (**self).save(conventions)
    }
}

/// In-process store, mostly for tests and embedding hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<CustomConventions>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: CustomConventions) -> Self {
        Self {
            inner: Mutex::new(conventions),
        }
    }
}

impl ConventionStore for MemoryStore {
    fn load(&self) -> Result<CustomConventions, StoreError> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        let conventions = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(conventions.clone())
    }

    fn save(&self, conventions: &CustomConventions) -> Result<(), StoreError> {
        let mut stored = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *stored = conventions.clone();
        Ok(())
    }
}

/// Stores the collection as one pretty-printed JSON object keyed by convention key.
///
/// A missing or empty file is an empty collection. Saves go to a sibling
/// temporary file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConventionStore for JsonFileStore {
    fn load(&self) -> Result<CustomConventions, StoreError> {
        if !self.path.exists() {
            return Ok(CustomConventions::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(CustomConventions::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, conventions: &CustomConventions) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(conventions).map_err(StoreError::Encode)?;

        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|e| self.write_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))
    }
}
