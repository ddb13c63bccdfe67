pub mod authoring;
pub mod conventions;
pub mod engine;
pub mod io;
pub mod parsing;
pub mod registry;
pub mod style;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use authoring::{AuthoringError, ConventionDraft, Resolution, SaveOutcome};
pub use conventions::*;
pub use engine::{DEFAULT_KEYWORD_COLOR, MarkupEngine, Proposal};
pub use io::*;
pub use parsing::{Segment, escape_html, parse, parse_segments};
pub use registry::ConventionRegistry;
pub use style::{StyleDescription, keyframes_css};
