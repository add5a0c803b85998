//! Anchor-id generation for headings
//!
//! The renderer stamps this id on heading nodes and the heading index uses
//! it for table-of-contents links, so there must be exactly one
//! implementation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a word char, kana, CJK ideograph, whitespace or `-`
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{4e00}-\x{9faf}\s-]")
        .expect("anchor character class is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("hyphen pattern is valid"));

/// Derive a URL-fragment-safe anchor id from heading text.
///
/// Lowercases, drops punctuation while keeping word characters and
/// Japanese script, turns whitespace runs into a single `-`, collapses
/// repeated hyphens and strips one hyphen from each end.
///
/// Total and pure: the empty string maps to the empty string, and two
/// headings with the same normalized text get the same id.
///
/// ```rust
/// use gakumark_core::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("日本語 見出し"), "日本語-見出し");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let dashed = WHITESPACE_RUN.replace_all(&kept, "-");
    let collapsed = HYPHEN_RUN.replace_all(&dashed, "-");

    let trimmed = collapsed.strip_prefix('-').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_heading() {
        assert_eq!(slugify("Hello World!"), "hello-world");
    }

    #[test]
    fn test_japanese_heading() {
        assert_eq!(slugify("日本語 見出し"), "日本語-見出し");
        assert_eq!(slugify("カタカナとひらがな"), "カタカナとひらがな");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  --Foo   Bar--  "), "foo-bar");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_ideographic_space() {
        assert_eq!(slugify("環境\u{3000}セットアップ"), "環境-セットアップ");
    }

    #[test]
    fn test_keeps_underscore_and_digits() {
        assert_eq!(slugify("Step_2: Install"), "step_2-install");
    }

    #[test]
    fn test_deterministic() {
        let first = slugify("設定ファイルの作成 (config)");
        let _ = slugify("something else entirely");
        assert_eq!(slugify("設定ファイルの作成 (config)"), first);
        assert_eq!(first, "設定ファイルの作成-config");
    }
}
