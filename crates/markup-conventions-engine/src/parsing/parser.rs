use std::ops::Range;

use crate::conventions::Convention;
use crate::registry::ConventionRegistry;

use super::{cursor::Cursor, types::Segment};

/// Splits `text` into plain runs and convention spans.
///
/// Conventions are applied one at a time in registry order (longest opening
/// first). Each pass looks for delimiters only in plain text. A span claimed
/// by an earlier pass is an atom: a later opening and closing may sit on
/// either side of it, making it a child of the new span, but no delimiter is
/// ever matched inside it.
///
/// Never fails: unmatched delimiters stay in the plain runs.
pub fn parse_segments<'a>(text: &'a str, registry: &'a ConventionRegistry) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    flush_text(&mut segments, text);

    for convention in registry {
        segments = apply_convention(&segments, convention);
    }

    segments
}

fn flush_text<'a>(out: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        out.push(Segment::Plain(text));
    }
}

/// A position in a segment list: byte `off` into segment `seg`.
///
/// Only plain segments are entered; a span is addressed as `(seg, 0)`, the
/// position just before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pos {
    seg: usize,
    off: usize,
}

impl Pos {
    const START: Pos = Pos { seg: 0, off: 0 };

    fn end_of(segments: &[Segment<'_>]) -> Pos {
        Pos {
            seg: segments.len(),
            off: 0,
        }
    }

    fn advanced(self, n: usize) -> Pos {
        Pos {
            seg: self.seg,
            off: self.off + n,
        }
    }
}

/// One pass of `convention` over the whole segment list.
fn apply_convention<'a>(
    segments: &[Segment<'a>],
    convention: &'a Convention,
) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(segments.len());
    let mut emitted = Pos::START;
    let mut at = Pos::START;

    loop {
        match try_parse_span(segments, at, convention.opening(), convention.closing()) {
            Attempt::Matched {
                full,
                children,
            } => {
                copy_range(segments, emitted..full.start, &mut out);
                out.push(Segment::Span {
                    convention,
                    children,
                });
                emitted = full.end;
                at = full.end;
            }
            Attempt::Literal(next) => at = next,
            // No closing anywhere ahead, so no later opening can close either.
            Attempt::Unterminated => break,
        }
    }

    copy_range(segments, emitted..Pos::end_of(segments), &mut out);
    out
}

enum Attempt<'a> {
    Matched {
        full: Range<Pos>,
        children: Vec<Segment<'a>>,
    },
    /// The opening at this position is literal text; resume scanning here.
    Literal(Pos),
    Unterminated,
}

/// Attempts to parse the next span at or after `from`.
///
/// The span ends at the first `closing` after the opening, giving the shortest
/// possible content. A closing token is therefore never swallowed as content
/// while a later closing-then-opening sequence follows it, which keeps
/// back-to-back spans such as `!a! !b!` apart.
///
/// Empty content (`!!`, `<>`) is not a span: the opening is literal text and
/// scanning resumes one byte further on.
fn try_parse_span<'a>(
    segments: &[Segment<'a>],
    from: Pos,
    opening: &str,
    closing: &str,
) -> Attempt<'a> {
    let Some(start) = find_plain(segments, from, opening) else {
        return Attempt::Unterminated;
    };
    let inner_start = start.advanced(opening.len());
    let Some(inner_end) = find_plain(segments, inner_start, closing) else {
        return Attempt::Unterminated;
    };

    let mut children = Vec::new();
    copy_range(segments, inner_start..inner_end, &mut children);
    if children.is_empty() {
        // Delimiters are ASCII, so one byte on is still a char boundary.
        return Attempt::Literal(start.advanced(1));
    }

    Attempt::Matched {
        full: start..inner_end.advanced(closing.len()),
        children,
    }
}

/// First occurrence of `pat` in plain text at or after `from`, stepping over spans.
fn find_plain(segments: &[Segment<'_>], from: Pos, pat: &str) -> Option<Pos> {
    for (seg, segment) in segments.iter().enumerate().skip(from.seg) {
        let Segment::Plain(run) = segment else {
            continue;
        };
        let mut cur = Cursor::new(run);
        if seg == from.seg {
            cur.bump_n(from.off);
        }
        if let Some(off) = cur.find(pat) {
            return Some(Pos { seg, off });
        }
    }
    None
}

/// Pushes everything in `range` to `out`: partial plain runs and whole spans.
fn copy_range<'a>(segments: &[Segment<'a>], range: Range<Pos>, out: &mut Vec<Segment<'a>>) {
    let Range { start, end } = range;
    for (seg, segment) in segments.iter().enumerate().skip(start.seg) {
        if seg > end.seg {
            break;
        }
        match segment {
            Segment::Plain(run) => {
                let from = if seg == start.seg { start.off } else { 0 };
                let to = if seg == end.seg { end.off } else { run.len() };
                if from < to {
                    flush_text(out, &run[from..to]);
                }
            }
            span @ Segment::Span { .. } => {
                if (Pos { seg, off: 0 }) >= start && seg < end.seg {
                    out.push(span.clone());
                }
            }
        }
    }
}
