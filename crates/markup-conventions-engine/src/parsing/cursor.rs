/// A byte cursor over one run of plain text.
///
/// Delimiters are ASCII, so every position where a delimiter matches is a
/// char boundary and slicing `s` at those positions is always valid.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Byte index of the next occurrence of `pat` at or after the cursor.
    pub fn find(&self, pat: &str) -> Option<usize> {
        let from = self.i.min(self.s.len());
        find_bytes(&self.s.as_bytes()[from..], pat.as_bytes()).map(|at| from + at)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
