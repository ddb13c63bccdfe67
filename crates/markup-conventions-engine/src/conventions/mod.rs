//! # Conventions
//!
//! A convention is a delimiter pair plus a style rule: text written as
//! `<ancient artifact>` renders inside a span styled by the `<`/`>` convention.
//!
//! ## Modules
//!
//! - **`model`**: `Convention`, `DelimiterPair`, `ColorPolicy`, `Effects` and the
//!   persisted `ConventionRecord`
//! - **`builtin`**: the three fixed conventions (`angleBrackets`, `squareBrackets`,
//!   `exclamation`)
//!
//! Built-in and custom conventions must never share an `(opening, closing)` pair.
//! That rule is checked when authoring (see `authoring::conflict`); the parser
//! trusts whatever set it is handed.

pub mod builtin;
pub mod model;

pub use builtin::{ANGLE_BRACKETS, BUILTIN_KEYS, EXCLAMATION, SQUARE_BRACKETS, builtins};
pub use model::{
    ColorPolicy, Convention, ConventionError, ConventionRecord, DelimiterPair, Effect, Effects,
    MAX_DELIMITER_LEN,
};
