use crate::conventions::{DelimiterPair, MAX_DELIMITER_LEN};

/// Derives an opening/closing pair from the opening an author typed.
///
/// - `c` gives `(c, c)`
/// - `cc` gives `(cc, cc)`
/// - `ab` gives `(ab, ba)`
/// - 3 or 4 characters split at the midpoint (the shorter half first): the
///   first half opens, the reversed second half closes. Best effort only;
///   distinct inputs can derive the same pair.
///
/// Returns `None` for empty or over-long input and for anything that is not
/// printable ASCII; the author should re-enter the sequence.
pub fn detect(raw_opening: &str) -> Option<DelimiterPair> {
    let raw = raw_opening.as_bytes();
    if raw.is_empty() || raw.len() > MAX_DELIMITER_LEN || !raw.iter().all(u8::is_ascii_graphic) {
        return None;
    }

    let pair = match raw.len() {
        1 | 2 => DelimiterPair::new(raw_opening, reversed(raw_opening)),
        n => {
            let (first, second) = raw_opening.split_at(n / 2);
            DelimiterPair::new(first, reversed(second))
        }
    };
    Some(pair)
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}
