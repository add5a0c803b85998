//! Image size hints
//!
//! Authors pick a display width by putting a keyword in the alt text, e.g.
//! `![small 夕焼け](sunset.png)`. The keyword selects a [`SizeHint`] and is
//! removed from the caption.

use gakumark_core::SizeHint;
use once_cell::sync::Lazy;
use regex::Regex;

/// Size keywords in priority order
const SIZE_KEYWORDS: [(SizeHint, &[&str]); 4] = [
    (SizeHint::Small, &["small", "小"]),
    (SizeHint::Medium, &["medium", "中"]),
    (SizeHint::Large, &["large", "大"]),
    (SizeHint::Full, &["full", "全幅"]),
];

/// Boundaries are ASCII word boundaries, so kana and kanji next to a
/// keyword count as a boundary while kanji keywords need an ASCII neighbour
static SIZE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)(small|medium|large|full|小|中|大|全幅)(?-u:\b)")
        .expect("size token pattern is valid")
});

/// Pick the size hint for an alt text.
///
/// Categories are checked in the order small, medium, large, full and the
/// first one whose keyword appears anywhere in the alt text wins,
/// regardless of where in the text it appears.
pub fn size_hint(alt: &str) -> SizeHint {
    let lowered = alt.to_lowercase();
    SIZE_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(hint, _)| *hint)
        .unwrap_or_default()
}

/// Remove standalone size keywords and trim the result
pub fn strip_size_tokens(alt: &str) -> String {
    SIZE_TOKEN.replace_all(alt, "").trim().to_string()
}
