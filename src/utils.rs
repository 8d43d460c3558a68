//! Small shared helpers.

/// Pluralization suffix: `""` for 1, `"s"` otherwise.
pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Format a count with a pluralized noun: `1 rule`, `3 rules`.
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
