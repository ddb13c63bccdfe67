//! Property-based tests for rendering
//!
//! Whatever the author types, the only markup in the output is the `<span>`
//! wrapping generated for matched conventions, and text without delimiters
//! comes back escaped and otherwise untouched.

use std::sync::OnceLock;

use markup_conventions_engine::{
    ConventionDraft, DEFAULT_KEYWORD_COLOR, Effect, Effects, MarkupEngine, MemoryStore,
    Resolution, escape_html,
};
use proptest::prelude::*;
use regex::Regex;

/// Engine with the built-ins plus customs whose delimiters are themselves
/// characters that need escaping.
fn engine() -> MarkupEngine<MemoryStore> {
    let engine = MarkupEngine::new(MemoryStore::new());
    for (opening, color) in [("\"", "#00ff00"), ("&'", "keyword"), ("<<", "inherit")] {
        let effects = Effects::NONE.with(Effect::Glow).with(Effect::Pulse);
        let draft = ConventionDraft::from_input(opening, color, effects).unwrap();
        engine.submit(draft, Resolution::Reject).unwrap();
    }
    engine
}

fn generated_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"<span class="markup-[A-Za-z0-9-]+" style="[^"<>]*">|</span>"#).unwrap()
    })
}

fn entity() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| Regex::new(r"^&(?:[a-z]+|#x?[0-9a-fA-F]+);").unwrap())
}

/// Author-like text dense with delimiters and markup characters
fn hostile_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z ]{1,6}",
            Just("<".to_string()),
            Just(">".to_string()),
            Just("<<".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just("!".to_string()),
            Just("&".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("&'".to_string()),
            Just("</span>".to_string()),
            Just("<script>".to_string()),
            Just("é→".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn output_has_no_markup_outside_generated_tags(text in hostile_text_strategy()) {
        let out = engine().parse(&text, DEFAULT_KEYWORD_COLOR);
        let stripped = generated_tag().replace_all(&out, "");

        for raw in ['<', '>', '"', '\''] {
            prop_assert!(!stripped.contains(raw), "raw {raw:?} in {out:?}");
        }
        for (i, _) in stripped.match_indices('&') {
            prop_assert!(
                entity().is_match(&stripped[i..]),
                "bare ampersand at {i} in {stripped:?}"
            );
        }
    }

    #[test]
    fn generated_tags_are_balanced(text in hostile_text_strategy()) {
        let out = engine().parse(&text, DEFAULT_KEYWORD_COLOR);
        let opened = out.matches("<span ").count();
        let closed = out.matches("</span>").count();
        prop_assert_eq!(opened, closed);
    }

    #[test]
    fn delimiter_free_text_is_only_escaped(text in "[^<>\\[\\]!]{0,64}") {
        let out = MarkupEngine::new(MemoryStore::new()).parse(&text, DEFAULT_KEYWORD_COLOR);
        prop_assert_eq!(out, escape_html(&text).into_owned());
    }

    #[test]
    fn arbitrary_unicode_never_panics(text in "\\PC{0,128}") {
        let _ = engine().parse(&text, "#123456");
    }
}
