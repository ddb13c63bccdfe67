use super::model::{ColorPolicy, Convention, DelimiterPair, Effect, Effects};

pub const ANGLE_BRACKETS: &str = "angleBrackets";
pub const SQUARE_BRACKETS: &str = "squareBrackets";
pub const EXCLAMATION: &str = "exclamation";

pub const BUILTIN_KEYS: [&str; 3] = [ANGLE_BRACKETS, SQUARE_BRACKETS, EXCLAMATION];

/// Color of the `!warning!` convention.
pub const EXCLAMATION_COLOR: &str = "#ff0000";

pub fn is_builtin_key(key: &str) -> bool {
    BUILTIN_KEYS.contains(&key)
}

/// The three conventions that are always active. They are never removed or reassigned.
pub fn builtins() -> Vec<Convention> {
    let glow = Effects::NONE.with(Effect::Glow);
    vec![
        Convention {
            key: ANGLE_BRACKETS.to_string(),
            delimiters: DelimiterPair::new("<", ">"),
            color: ColorPolicy::Keyword,
            effects: glow,
            syntax: "<text>".to_string(),
            description: "Keywords, glowing in the keyword color".to_string(),
            example: "The <ancient artifact> hums.".to_string(),
        },
        Convention {
            key: SQUARE_BRACKETS.to_string(),
            delimiters: DelimiterPair::new("[", "]"),
            color: ColorPolicy::Inherit,
            effects: glow,
            syntax: "[text]".to_string(),
            description: "Glow in the surrounding color".to_string(),
            example: "A [mysterious] figure waits.".to_string(),
        },
        Convention {
            key: EXCLAMATION.to_string(),
            delimiters: DelimiterPair::new("!", "!"),
            color: ColorPolicy::Literal(EXCLAMATION_COLOR.to_string()),
            effects: glow,
            syntax: "!text!".to_string(),
            description: "Warnings, glowing red".to_string(),
            example: "!Danger! The floor gives way.".to_string(),
        },
    ]
}
