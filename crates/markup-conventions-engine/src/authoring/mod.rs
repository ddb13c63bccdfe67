//! # Authoring
//!
//! Turning author input into a custom convention:
//!
//! 1. `pattern::detect` derives the delimiter pair from the typed opening
//! 2. `ConventionDraft::from_input` validates the color and assembles a draft
//! 3. `conflict::find_conflicts` checks the pair against built-ins and custom entries
//! 4. `MarkupEngine::submit` saves it, or reports the conflict so the author
//!    can choose [`Resolution::EditExisting`] or cancel
//!
//! Both error cases are soft: nothing is saved and the author re-enters or
//! picks a resolution.

pub mod conflict;
pub mod pattern;

pub use conflict::{find_conflicts, find_conflicts_excluding};
pub use pattern::detect;

use crate::conventions::{ColorPolicy, Convention, DelimiterPair, Effects};
use crate::io::StoreError;

/// A candidate convention that has no key yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionDraft {
    pub delimiters: DelimiterPair,
    pub color: ColorPolicy,
    pub effects: Effects,
    pub syntax: String,
    pub description: String,
    pub example: String,
}

impl ConventionDraft {
    /// Builds a draft from raw author input.
    ///
    /// `color` is `#rgb`, `#rrggbb`, `inherit` or `keyword`.
    pub fn from_input(
        raw_opening: &str,
        color: &str,
        effects: Effects,
    ) -> Result<Self, AuthoringError> {
        let delimiters = detect(raw_opening)
            .ok_or_else(|| AuthoringError::InvalidPattern(raw_opening.to_string()))?;
        let color = color
            .parse::<ColorPolicy>()
            .map_err(|_| AuthoringError::InvalidColor(color.to_string()))?;

        Ok(Self {
            syntax: format!("{}text{}", delimiters.opening, delimiters.closing),
            example: format!("{}example{}", delimiters.opening, delimiters.closing),
            description: String::new(),
            delimiters,
            color,
            effects,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub(crate) fn into_convention(self, key: String) -> Convention {
        Convention {
            key,
            delimiters: self.delimiters,
            color: self.color,
            effects: self.effects,
            syntax: self.syntax,
            description: self.description,
            example: self.example,
        }
    }
}

/// What to do when a submitted pair is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Save nothing and report the conflict.
    #[default]
    Reject,
    /// Save the draft over the conflicting custom convention, keeping its key.
    EditExisting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(Convention),
    Updated(Convention),
}

impl SaveOutcome {
    pub fn convention(&self) -> &Convention {
        match self {
            SaveOutcome::Created(c) | SaveOutcome::Updated(c) => c,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    #[error("Invalid pattern {0:?}: enter a 1-4 character opening sequence")]
    InvalidPattern(String),

    #[error("Invalid color {0:?}: use #rgb, #rrggbb, inherit or keyword")]
    InvalidColor(String),

    #[error("Delimiters {pair} are already used by {}", keys(.existing))]
    Conflict {
        pair: DelimiterPair,
        existing: Vec<Convention>,
    },

    #[error("Built-in convention {0:?} cannot be changed")]
    BuiltinImmutable(String),

    #[error("No custom convention with key {0:?}")]
    UnknownKey(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn keys(conventions: &[Convention]) -> String {
    conventions
        .iter()
        .map(|c| c.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
