//! # Markup Parsing
//!
//! Turns author text into sanitized, styled HTML against a convention registry.
//!
//! ## Architecture
//!
//! Parsing produces an ordered list of [`Segment`]s before any HTML exists:
//! - `Plain`: text no convention claimed
//! - `Span`: content claimed by one convention, delimiters stripped. Its
//!   children are plain runs plus any spans claimed by earlier passes, so
//!   `[a <b> c]` is a square-bracket span enclosing an angle span.
//!
//! Rendering escapes each plain run exactly once and wraps spans in
//! generated `<span>` tags. Since span markup is produced after escaping,
//! already-escaped content is never escaped again and author text can never
//! smuggle in tags of its own.
//!
//! ## Modules
//!
//! - **`cursor`**: byte cursor used to scan plain runs for delimiters
//! - **`parser`**: `parse_segments()`, one pass per convention, longest opening first
//! - **`render`**: `render_html()` and the `escape_html` primitive
//! - **`types`**: the `Segment` enum

pub mod cursor;
pub mod parser;
pub mod render;
pub mod types;

pub use parser::parse_segments;
pub use render::{escape_html, render_html};
pub use types::Segment;

use crate::registry::ConventionRegistry;

/// Parses `text` against `registry` and renders sanitized HTML.
///
/// Never fails. Malformed or unterminated markup renders as escaped text.
pub fn parse(text: &str, registry: &ConventionRegistry, keyword_color: &str) -> String {
    render_html(&parse_segments(text, registry), keyword_color)
}
