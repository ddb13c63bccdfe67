//! # Style Compilation
//!
//! Turns a convention's color policy and effects into an inline style.
//! Compilation is pure: the same policy, effects and keyword color always give
//! the same declarations in the same order.
//!
//! Flash and Pulse do not embed keyframes per span. They name animations that
//! the display surface registers once, see [`keyframes_css`].

use std::fmt;

use crate::conventions::{ColorPolicy, Effect, Effects, model::is_hex_color};

/// Keyword color used when the host does not pick one, or picks an invalid one.
pub const DEFAULT_KEYWORD_COLOR: &str = "#ff00ff";

pub const FLASH_ANIMATION: &str = "markup-flash";
pub const PULSE_ANIMATION: &str = "markup-pulse";

/// Glow color when the convention inherits its color.
const CURRENT_COLOR: &str = "currentColor";

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

/// Ordered style declarations. `Display` gives the inline `style` attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDescription {
    declarations: Vec<Declaration>,
}

impl StyleDescription {
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
        });
    }
}

impl fmt::Display for StyleDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", d.property, d.value)?;
        }
        Ok(())
    }
}

/// `keyword_color` if it is `#rgb` or `#rrggbb`, else [`DEFAULT_KEYWORD_COLOR`].
///
/// The value is written into CSS verbatim, so anything else could add
/// declarations of its own.
pub fn resolve_keyword_color(keyword_color: &str) -> &str {
    if is_hex_color(keyword_color) {
        keyword_color
    } else {
        DEFAULT_KEYWORD_COLOR
    }
}

/// Compiles a color policy and effect set into a style.
///
/// `keyword_color` resolves [`ColorPolicy::Keyword`] for this call only, so one
/// convention can render in different colors across calls.
pub fn compile(color: &ColorPolicy, effects: Effects, keyword_color: &str) -> StyleDescription {
    let resolved = match color {
        ColorPolicy::Literal(hex) => Some(hex.as_str()),
        ColorPolicy::Inherit => None,
        ColorPolicy::Keyword => Some(resolve_keyword_color(keyword_color)),
    };

    let mut style = StyleDescription::default();
    if let Some(c) = resolved {
        style.push("color", c);
    }

    let mut animations = Vec::new();
    for effect in effects.iter() {
        match effect {
            Effect::Glow => {
                let c = resolved.unwrap_or(CURRENT_COLOR);
                style.push("text-shadow", format!("0 0 4px {c}, 0 0 8px {c}, 0 0 16px {c}"));
            }
            Effect::Bold => style.push("font-weight", "bold"),
            Effect::Flash => animations.push(format!("{FLASH_ANIMATION} 1s step-end infinite")),
            Effect::Pulse => {
                animations.push(format!("{PULSE_ANIMATION} 2s ease-in-out infinite"))
            }
        }
    }
    // Only one `animation` property survives in CSS, so both effects share it.
    if !animations.is_empty() {
        style.push("animation", animations.join(", "));
    }

    style
}

/// Keyframes for the named animations that Flash and Pulse reference.
pub fn keyframes_css() -> &'static str {
    concat!(
        "@keyframes markup-flash {\n",
        "  0%, 100% { opacity: 1; }\n",
        "  50% { opacity: 0; }\n",
        "}\n",
        "@keyframes markup-pulse {\n",
        "  0%, 100% { opacity: 1; }\n",
        "  50% { opacity: 0.4; }\n",
        "}\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn effects(list: &[Effect]) -> Effects {
        list.iter().copied().collect()
    }

    #[test]
    fn inherit_without_effects_is_empty() {
        let style = compile(&ColorPolicy::Inherit, Effects::NONE, "#ff00ff");
        assert!(style.is_empty());
        assert_eq!(style.to_string(), "");
    }

    #[test]
    fn literal_color_ignores_keyword_color() {
        let style = compile(
            &ColorPolicy::Literal("#ff0000".into()),
            Effects::NONE,
            "#00ffff",
        );
        assert_eq!(style.to_string(), "color: #ff0000");
    }

    #[test]
    fn keyword_color_resolves_per_call() {
        let a = compile(&ColorPolicy::Keyword, Effects::NONE, "#00ffff");
        let b = compile(&ColorPolicy::Keyword, Effects::NONE, "#ffaa00");
        assert_eq!(a.get("color"), Some("#00ffff"));
        assert_eq!(b.get("color"), Some("#ffaa00"));
    }

    #[test]
    fn invalid_keyword_color_cannot_inject_declarations() {
        let style = compile(
            &ColorPolicy::Keyword,
            effects(&[Effect::Glow]),
            "#fff; position: fixed; inset: 0",
        );
        assert_eq!(style.get("color"), Some(DEFAULT_KEYWORD_COLOR));
        assert_eq!(style.get("position"), None);
        assert!(!style.to_string().contains("fixed"));
    }

    #[test]
    fn resolve_keyword_color_accepts_hex_only() {
        assert_eq!(resolve_keyword_color("#0af"), "#0af");
        assert_eq!(resolve_keyword_color("#00AAFF"), "#00AAFF");
        assert_eq!(resolve_keyword_color("red"), DEFAULT_KEYWORD_COLOR);
        assert_eq!(resolve_keyword_color(" #00aaff"), DEFAULT_KEYWORD_COLOR);
    }

    #[test]
    fn glow_uses_resolved_color() {
        let style = compile(&ColorPolicy::Keyword, effects(&[Effect::Glow]), "#00ffff");
        assert_eq!(
            style.to_string(),
            "color: #00ffff; text-shadow: 0 0 4px #00ffff, 0 0 8px #00ffff, 0 0 16px #00ffff"
        );
    }

    #[test]
    fn inherited_glow_uses_current_color() {
        let style = compile(&ColorPolicy::Inherit, effects(&[Effect::Glow]), "#00ffff");
        assert_eq!(style.get("color"), None);
        assert_eq!(
            style.get("text-shadow"),
            Some("0 0 4px currentColor, 0 0 8px currentColor, 0 0 16px currentColor")
        );
    }

    #[test]
    fn declarations_follow_fixed_effect_order() {
        let style = compile(
            &ColorPolicy::Literal("#123456".into()),
            effects(&[Effect::Pulse, Effect::Bold, Effect::Flash, Effect::Glow]),
            "#ff00ff",
        );
        let properties: Vec<_> = style.declarations().iter().map(|d| d.property).collect();
        assert_eq!(
            properties,
            vec!["color", "text-shadow", "font-weight", "animation"]
        );
        assert_eq!(
            style.get("animation"),
            Some("markup-flash 1s step-end infinite, markup-pulse 2s ease-in-out infinite")
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let all = effects(&Effect::ALL);
        let a = compile(&ColorPolicy::Keyword, all, "#abcdef");
        let b = compile(&ColorPolicy::Keyword, all, "#abcdef");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn keyframes_define_referenced_animations() {
        let css = keyframes_css();
        assert!(css.contains(&format!("@keyframes {FLASH_ANIMATION}")));
        assert!(css.contains(&format!("@keyframes {PULSE_ANIMATION}")));
    }
}
