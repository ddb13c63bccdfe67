// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_room_description(paragraphs: usize) -> String {
    let base = "The <ancient artifact> hums beside a [sealed door]. !Danger! The floor is cracked, \
                and a draft whispers through the <iron grate>. Nothing else stirs.\n\n";
    base.repeat(paragraphs)
}

/// Text where every opening is left unterminated, so each pass scans to the end.
#[allow(dead_code)]
pub fn generate_unterminated(paragraphs: usize) -> String {
    "A < b and [c with ! but never closed ".repeat(paragraphs * 4)
}

#[allow(dead_code)]
pub fn generate_plain_prose(paragraphs: usize) -> String {
    "Plain prose with no markup at all, only words & the odd ampersand.\n\n".repeat(paragraphs)
}
