//! ANSI preview of rendered segments.
//!
//! Terminals have no text-shadow or CSS animations, so effects map to the
//! closest attributes: Glow underlines, Flash and Pulse blink slowly.

use crossterm::{
    queue,
    style::{Attribute, Color, ContentStyle, Print, PrintStyledContent},
};
use markup_conventions_engine::{
    ColorPolicy, Convention, Effect, Segment, style::resolve_keyword_color,
};
use std::io::{self, Write};

pub fn write_segments<W: Write>(
    out: &mut W,
    segments: &[Segment<'_>],
    keyword_color: &str,
) -> io::Result<()> {
    queue_segments(out, segments, None, keyword_color)?;
    queue!(out, Print("\n"))?;
    out.flush()
}

/// Queues `segments` under the style of their enclosing span, if any.
fn queue_segments<W: Write>(
    out: &mut W,
    segments: &[Segment<'_>],
    enclosing: Option<ContentStyle>,
    keyword_color: &str,
) -> io::Result<()> {
    for segment in segments {
        match (segment, enclosing) {
            (Segment::Plain(text), None) => queue!(out, Print(text))?,
            (Segment::Plain(text), Some(style)) => {
                queue!(out, PrintStyledContent(style.apply(text)))?
            }
            (
                Segment::Span {
                    convention,
                    children,
                },
                _,
            ) => {
                let style = span_style(convention, keyword_color, enclosing.unwrap_or_default());
                queue_segments(out, children, Some(style), keyword_color)?;
            }
        }
    }
    Ok(())
}

/// The style of `convention`, layered over the style of the span enclosing it.
fn span_style(convention: &Convention, keyword_color: &str, enclosing: ContentStyle) -> ContentStyle {
    let mut style = enclosing;
    let color = match &convention.color {
        ColorPolicy::Literal(hex) => hex_to_color(hex),
        ColorPolicy::Keyword => hex_to_color(resolve_keyword_color(keyword_color)),
        ColorPolicy::Inherit => None,
    };
    if color.is_some() {
        style.foreground_color = color;
    }

    for effect in convention.effects.iter() {
        let attribute = match effect {
            Effect::Glow => Attribute::Underlined,
            Effect::Bold => Attribute::Bold,
            Effect::Flash | Effect::Pulse => Attribute::SlowBlink,
        };
        style.attributes.set(attribute);
    }
    style
}

/// `#rgb` or `#rrggbb` as a true color.
fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut it = digits.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::Rgb {
                r: it.next()??,
                g: it.next()??,
                b: it.next()??,
            })
        }
        6 => Some(Color::Rgb {
            r: channel(digits.get(0..2)?)?,
            g: channel(digits.get(2..4)?)?,
            b: channel(digits.get(4..6)?)?,
        }),
        _ => None,
    }
}
