use uuid::Uuid;

use crate::authoring::{
    AuthoringError, ConventionDraft, Resolution, SaveOutcome, find_conflicts,
    find_conflicts_excluding,
};
use crate::conventions::{Convention, ConventionRecord, Effects, builtin};
use crate::io::{ConventionStore, StoreError};
use crate::parsing::{self, Segment};
use crate::registry::ConventionRegistry;

pub use crate::style::DEFAULT_KEYWORD_COLOR;

/// Renders author text against the built-ins plus whatever custom conventions
/// the store currently holds.
///
/// Every render re-reads the store, so authoring changes apply to the next call
/// without any cache invalidation. Nothing is cached between calls, so the
/// engine is as thread-safe as its store.
#[derive(Debug)]
pub struct MarkupEngine<S> {
    store: S,
}

impl<S: ConventionStore> MarkupEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fresh registry snapshot, or the store error.
    pub fn try_registry(&self) -> Result<ConventionRegistry, StoreError> {
        let custom = self.store.load()?;
        Ok(ConventionRegistry::with_custom(&custom))
    }

    /// Fresh registry snapshot, falling back to built-ins only if the store fails.
    pub fn registry(&self) -> ConventionRegistry {
        self.try_registry().unwrap_or_else(|e| {
            log::warn!("Rendering with built-in conventions only: {e}");
            ConventionRegistry::builtin()
        })
    }

    /// Renders `text` to sanitized HTML. Never fails; store errors fall back to built-ins.
    pub fn parse(&self, text: &str, keyword_color: &str) -> String {
        parsing::parse(text, &self.registry(), keyword_color)
    }

    /// Renders `text`, surfacing store errors instead of falling back.
    pub fn try_parse(&self, text: &str, keyword_color: &str) -> Result<String, StoreError> {
        Ok(parsing::parse(text, &self.try_registry()?, keyword_color))
    }

    /// Parses `text` and hands the segments to `render`, for display surfaces
    /// that do not take HTML.
    pub fn segments<T>(&self, text: &str, render: impl FnOnce(&[Segment<'_>]) -> T) -> T {
        let registry = self.registry();
        let segments = parsing::parse_segments(text, &registry);
        render(&segments)
    }

    /// Like [`segments`](Self::segments), surfacing store errors instead of falling back.
    pub fn try_segments<T>(
        &self,
        text: &str,
        render: impl FnOnce(&[Segment<'_>]) -> T,
    ) -> Result<T, StoreError> {
        let registry = self.try_registry()?;
        let segments = parsing::parse_segments(text, &registry);
        Ok(render(&segments))
    }

    /// Valid custom conventions in key order.
    pub fn custom_conventions(&self) -> Result<Vec<Convention>, StoreError> {
        let custom = self.store.load()?;
        Ok(custom
            .into_iter()
            .filter(|(key, record)| record.key == *key)
            .filter_map(|(_, record)| Convention::try_from(record).ok())
            .collect())
    }

    /// Validates author input and reports which conventions already use the
    /// derived pair, without saving anything.
    pub fn propose(
        &self,
        raw_opening: &str,
        color: &str,
        effects: Effects,
    ) -> Result<Proposal, AuthoringError> {
        let draft = ConventionDraft::from_input(raw_opening, color, effects)?;
        let registry = self.try_registry()?;
        let conflicts = find_conflicts(&draft.delimiters, &registry)
            .into_iter()
            .cloned()
            .collect();
        Ok(Proposal { draft, conflicts })
    }

    /// Saves a draft as a new custom convention.
    ///
    /// If its pair is already taken the draft is rejected with
    /// [`AuthoringError::Conflict`], unless `resolution` is
    /// [`Resolution::EditExisting`], which overwrites the conflicting custom
    /// convention under its existing key. Built-ins can never be overwritten.
    pub fn submit(
        &self,
        draft: ConventionDraft,
        resolution: Resolution,
    ) -> Result<SaveOutcome, AuthoringError> {
        let mut custom = self.store.load()?;
        let registry = ConventionRegistry::with_custom(&custom);
        let conflicts = find_conflicts(&draft.delimiters, &registry);

        let Some(&existing) = conflicts.first() else {
            let convention = draft.into_convention(new_custom_key());
            custom.insert(convention.key.clone(), ConventionRecord::from(&convention));
            self.store.save(&custom)?;
            log::debug!("Created custom convention {}", convention.key);
            return Ok(SaveOutcome::Created(convention));
        };

        match resolution {
            Resolution::Reject => Err(AuthoringError::Conflict {
                pair: draft.delimiters,
                existing: conflicts.into_iter().cloned().collect(),
            }),
            Resolution::EditExisting if existing.is_builtin() => {
                Err(AuthoringError::BuiltinImmutable(existing.key.clone()))
            }
            Resolution::EditExisting => {
                let convention = draft.into_convention(existing.key.clone());
                custom.insert(convention.key.clone(), ConventionRecord::from(&convention));
                self.store.save(&custom)?;
                log::debug!("Updated custom convention {}", convention.key);
                Ok(SaveOutcome::Updated(convention))
            }
        }
    }

    /// Replaces the custom convention stored under `key`.
    pub fn update(&self, key: &str, draft: ConventionDraft) -> Result<Convention, AuthoringError> {
        if builtin::is_builtin_key(key) {
            return Err(AuthoringError::BuiltinImmutable(key.to_string()));
        }
        let mut custom = self.store.load()?;
        if !custom.contains_key(key) {
            return Err(AuthoringError::UnknownKey(key.to_string()));
        }

        let registry = ConventionRegistry::with_custom(&custom);
        let conflicts = find_conflicts_excluding(&draft.delimiters, &registry, key);
        if !conflicts.is_empty() {
            return Err(AuthoringError::Conflict {
                pair: draft.delimiters,
                existing: conflicts.into_iter().cloned().collect(),
            });
        }

        let convention = draft.into_convention(key.to_string());
        custom.insert(convention.key.clone(), ConventionRecord::from(&convention));
        self.store.save(&custom)?;
        log::debug!("Updated custom convention {key}");
        Ok(convention)
    }

    /// Deletes the custom convention stored under `key`, returning its record.
    pub fn remove(&self, key: &str) -> Result<ConventionRecord, AuthoringError> {
        if builtin::is_builtin_key(key) {
            return Err(AuthoringError::BuiltinImmutable(key.to_string()));
        }
        let mut custom = self.store.load()?;
        let removed = custom
            .remove(key)
            .ok_or_else(|| AuthoringError::UnknownKey(key.to_string()))?;
        self.store.save(&custom)?;
        log::debug!("Removed custom convention {key}");
        Ok(removed)
    }
}

/// A validated draft plus the conventions it would collide with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub draft: ConventionDraft,
    pub conflicts: Vec<Convention>,
}

impl Proposal {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

fn new_custom_key() -> String {
    format!("custom-{}", Uuid::new_v4().simple())
}
