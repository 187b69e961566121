//! Text canonicalization used by every comparison.

/// Lower-cases `text`, trims it, and collapses each internal whitespace run to one space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
