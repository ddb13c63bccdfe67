use std::borrow::Cow;

use crate::conventions::Convention;
use crate::style;

use super::types::Segment;

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Renders segments to sanitized HTML.
///
/// Every piece of author text is escaped exactly once, as a plain run at
/// whatever depth it sits. Span markup is generated around already-escaped
/// children and is never passed through the escaper again.
///
/// A `keyword_color` that is not `#rgb` or `#rrggbb` is replaced with
/// [`DEFAULT_KEYWORD_COLOR`](style::DEFAULT_KEYWORD_COLOR), since it lands
/// inside a `style` attribute.
pub fn render_html(segments: &[Segment<'_>], keyword_color: &str) -> String {
    let resolved = style::resolve_keyword_color(keyword_color);
    if resolved != keyword_color {
        log::warn!("Ignoring invalid keyword color {keyword_color:?}, using {resolved}");
    }
    let mut out = String::new();
    push_segments(&mut out, segments, resolved);
    out
}

/// `<span class="markup-{key}" style="{style}">{rendered children}</span>`
pub fn render_span(convention: &Convention, children: &[Segment<'_>], keyword_color: &str) -> String {
    let mut out = String::new();
    push_span(&mut out, convention, children, style::resolve_keyword_color(keyword_color));
    out
}

fn push_segments(out: &mut String, segments: &[Segment<'_>], keyword_color: &str) {
    for segment in segments {
        match segment {
            Segment::Plain(text) => out.push_str(&escape_html(text)),
            Segment::Span {
                convention,
                children,
            } => push_span(out, convention, children, keyword_color),
        }
    }
}

fn push_span(out: &mut String, convention: &Convention, children: &[Segment<'_>], keyword_color: &str) {
    let style = style::compile(&convention.color, convention.effects, keyword_color);
    out.push_str(&format!(
        r#"<span class="{}" style="{}">"#,
        html_escape::encode_double_quoted_attribute(&convention.class_name()),
        html_escape::encode_double_quoted_attribute(&style.to_string()),
    ));
    push_segments(out, children, keyword_color);
    out.push_str("</span>");
}
