use std::borrow::Cow;

use crate::conventions::Convention;

/// One piece of parsed text, borrowed from the input and the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Text no convention claimed. Escaped once, at render time.
    Plain(&'a str),
    /// Text between a convention's delimiters (delimiters excluded).
    ///
    /// `children` holds the plain runs and any spans claimed by earlier
    /// passes. Those inner spans are atoms: later conventions can
    /// enclose them but never match inside them.
    Span {
        convention: &'a Convention,
        children: Vec<Segment<'a>>,
    },
}

impl<'a> Segment<'a> {
    /// The visible text, delimiters of this and any nested span excluded.
    pub fn text(&self) -> Cow<'a, str> {
        match self {
            Segment::Plain(text) => Cow::Borrowed(*text),
            Segment::Span { children, .. } => match children.as_slice() {
                [only] => only.text(),
                _ => Cow::Owned(children.iter().map(|c| c.text()).collect()),
            },
        }
    }

    pub fn convention(&self) -> Option<&'a Convention> {
        match self {
            Segment::Plain(_) => None,
            Segment::Span { convention, .. } => Some(*convention),
        }
    }

    /// Nested segments of a span; empty for plain text.
    pub fn children(&self) -> &[Segment<'a>] {
        match self {
            Segment::Plain(_) => &[],
            Segment::Span { children, .. } => children,
        }
    }
}
