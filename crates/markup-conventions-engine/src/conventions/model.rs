use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::builtin;

/// Delimiters are 1-4 printable ASCII characters.
pub const MAX_DELIMITER_LEN: usize = 4;

/// An opening/closing pair that bounds a styled span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelimiterPair {
    pub opening: String,
    pub closing: String,
}

impl DelimiterPair {
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }

    /// Both halves are 1-4 printable (graphic) ASCII characters.
    pub fn is_valid(&self) -> bool {
        is_valid_delimiter(&self.opening) && is_valid_delimiter(&self.closing)
    }
}

impl fmt::Display for DelimiterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…{}", self.opening, self.closing)
    }
}

pub(crate) fn is_valid_delimiter(s: &str) -> bool {
    (1..=MAX_DELIMITER_LEN).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_graphic())
}

/// How a convention picks its text color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorPolicy {
    /// A fixed hex color, stored lowercase (`#ff0000`).
    Literal(String),
    /// Keep whatever color is already in scope.
    Inherit,
    /// Use the keyword color the caller passes to `parse`.
    Keyword,
}

impl ColorPolicy {
    pub const INHERIT: &'static str = "inherit";
    pub const KEYWORD: &'static str = "keyword";
}

impl fmt::Display for ColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorPolicy::Literal(hex) => f.write_str(hex),
            ColorPolicy::Inherit => f.write_str(Self::INHERIT),
            ColorPolicy::Keyword => f.write_str(Self::KEYWORD),
        }
    }
}

impl FromStr for ColorPolicy {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::INHERIT) {
            Ok(ColorPolicy::Inherit)
        } else if trimmed.eq_ignore_ascii_case(Self::KEYWORD) {
            Ok(ColorPolicy::Keyword)
        } else if is_hex_color(trimmed) {
            Ok(ColorPolicy::Literal(trimmed.to_ascii_lowercase()))
        } else {
            Err(ConventionError::InvalidColor(s.to_string()))
        }
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(s: &str) -> bool {
    static HEX_REGEX: OnceLock<Regex> = OnceLock::new();
    let hex_regex = HEX_REGEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("Invalid hex color regex")
    });
    hex_regex.is_match(s)
}

/// A single visual effect. Declaration order is the order of [`Effect::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Glow,
    Bold,
    Flash,
    Pulse,
}

impl Effect {
    pub const ALL: [Effect; 4] = [Effect::Glow, Effect::Bold, Effect::Flash, Effect::Pulse];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Glow => "glow",
            Effect::Bold => "bold",
            Effect::Flash => "flash",
            Effect::Pulse => "pulse",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The effect set of a convention.
///
/// Serializes as `{ glow, bold, flash, pulse }`, the shape of the persisted record.
/// Missing flags deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    pub glow: bool,
    pub bold: bool,
    pub flash: bool,
    pub pulse: bool,
}

impl Effects {
    pub const NONE: Effects = Effects {
        glow: false,
        bold: false,
        flash: false,
        pulse: false,
    };

    pub fn with(mut self, effect: Effect) -> Self {
        *self.flag_mut(effect) = true;
        self
    }

    pub fn contains(&self, effect: Effect) -> bool {
        match effect {
            Effect::Glow => self.glow,
            Effect::Bold => self.bold,
            Effect::Flash => self.flash,
            Effect::Pulse => self.pulse,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Present effects in the fixed order Glow, Bold, Flash, Pulse.
    pub fn iter(&self) -> impl Iterator<Item = Effect> + use<> {
        let effects = *self;
        Effect::ALL
            .into_iter()
            .filter(move |e| effects.contains(*e))
    }

    fn flag_mut(&mut self, effect: Effect) -> &mut bool {
        match effect {
            Effect::Glow => &mut self.glow,
            Effect::Bold => &mut self.bold,
            Effect::Flash => &mut self.flash,
            Effect::Pulse => &mut self.pulse,
        }
    }
}

impl FromIterator<Effect> for Effects {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        iter.into_iter().fold(Effects::NONE, Effects::with)
    }
}

impl fmt::Display for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<_> = self.iter().map(Effect::name).collect();
        f.write_str(&names.join("+"))
    }
}

/// A named delimiter pair plus the style applied to text between the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convention {
    pub key: String,
    pub delimiters: DelimiterPair,
    pub color: ColorPolicy,
    pub effects: Effects,
    /// Display-only metadata; the parser never reads these.
    pub syntax: String,
    pub description: String,
    pub example: String,
}

impl Convention {
    pub fn opening(&self) -> &str {
        &self.delimiters.opening
    }

    pub fn closing(&self) -> &str {
        &self.delimiters.closing
    }

    /// CSS class carried by every span this convention renders.
    pub fn class_name(&self) -> String {
        format!("markup-{}", self.key)
    }

    pub fn is_builtin(&self) -> bool {
        builtin::is_builtin_key(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConventionError {
    #[error("delimiter {0:?} must be 1-4 printable ASCII characters")]
    InvalidDelimiter(String),
    #[error("color {0:?} must be #rgb, #rrggbb, \"inherit\" or \"keyword\"")]
    InvalidColor(String),
    #[error("key {0:?} is reserved for a built-in convention")]
    ReservedKey(String),
}

/// One custom convention as read from and written to the persistence store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionRecord {
    pub key: String,
    #[serde(default)]
    pub syntax: String,
    pub opening: String,
    pub closing: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
    pub color: String,
    #[serde(default)]
    pub effects: Effects,
}

impl From<&Convention> for ConventionRecord {
    fn from(c: &Convention) -> Self {
        Self {
            key: c.key.clone(),
            syntax: c.syntax.clone(),
            opening: c.delimiters.opening.clone(),
            closing: c.delimiters.closing.clone(),
            description: c.description.clone(),
            example: c.example.clone(),
            color: c.color.to_string(),
            effects: c.effects,
        }
    }
}

impl TryFrom<ConventionRecord> for Convention {
    type Error = ConventionError;

    fn try_from(record: ConventionRecord) -> Result<Self, Self::Error> {
        if builtin::is_builtin_key(&record.key) {
            return Err(ConventionError::ReservedKey(record.key));
        }
        for delimiter in [&record.opening, &record.closing] {
            if !is_valid_delimiter(delimiter) {
                return Err(ConventionError::InvalidDelimiter(delimiter.clone()));
            }
        }
        let color = record.color.parse()?;

        Ok(Convention {
            key: record.key,
            delimiters: DelimiterPair::new(record.opening, record.closing),
            color,
            effects: record.effects,
            syntax: record.syntax,
            description: record.description,
            example: record.example,
        })
    }
}
