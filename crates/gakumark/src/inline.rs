//! Inline span substitution
//!
//! Four regex passes run one after another over a line: strong, emphasis,
//! inline code, links. Each pass replaces its matches with private-use
//! marker characters, so later passes see (and may match across) the spans
//! earlier passes produced. The marked string is then split into a flat
//! [`Inline`] run.

use std::borrow::Cow;

use gakumark_core::{Inline, Span, SpanKind};
use once_cell::sync::Lazy;
use regex::Regex;

const STRONG_OPEN: char = '\u{E000}';
const STRONG_CLOSE: char = '\u{E001}';
const EM_OPEN: char = '\u{E002}';
const EM_CLOSE: char = '\u{E003}';
const CODE_OPEN: char = '\u{E004}';
const CODE_CLOSE: char = '\u{E005}';
const LINK_OPEN: char = '\u{E006}';
const LINK_HREF_END: char = '\u{E007}';
const LINK_CLOSE: char = '\u{E008}';

const STRONG_REPLACEMENT: &str = "\u{E000}${1}\u{E001}";
const EM_REPLACEMENT: &str = "\u{E002}${1}\u{E003}";
const CODE_REPLACEMENT: &str = "\u{E004}${1}\u{E005}";
const LINK_REPLACEMENT: &str = "\u{E006}${2}\u{E007}${1}\u{E008}";

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("emphasis pattern is valid"));
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").expect("code pattern is valid"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

fn is_marker(c: char) -> bool {
    (STRONG_OPEN..=LINK_CLOSE).contains(&c)
}

/// Apply the inline passes to one line of text.
///
/// Never fails: text that does not match a pass is left as literal text.
pub fn substitute(line: &str) -> Vec<Inline> {
    // Author text must not carry our markers into the passes
    let line: Cow<'_, str> = if line.chars().any(is_marker) {
        Cow::Owned(line.chars().filter(|c| !is_marker(*c)).collect())
    } else {
        Cow::Borrowed(line)
    };

    let marked = STRONG.replace_all(&line, STRONG_REPLACEMENT);
    let marked = EMPHASIS.replace_all(&marked, EM_REPLACEMENT);
    let marked = CODE.replace_all(&marked, CODE_REPLACEMENT);
    let marked = LINK.replace_all(&marked, LINK_REPLACEMENT);

    split_marked(&marked)
}

/// Split a marked string into inline events
fn split_marked(marked: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut text = String::new();
    let mut chars = marked.chars();

    while let Some(c) = chars.next() {
        let event = match c {
            STRONG_OPEN => Inline::Start(Span::Strong),
            STRONG_CLOSE => Inline::End(SpanKind::Strong),
            EM_OPEN => Inline::Start(Span::Emphasis),
            EM_CLOSE => Inline::End(SpanKind::Emphasis),
            CODE_OPEN => Inline::Start(Span::Code),
            CODE_CLOSE => Inline::End(SpanKind::Code),
            LINK_OPEN => {
                // Markers from earlier passes that landed inside the URL are dropped
                let url: String = chars
                    .by_ref()
                    .take_while(|c| *c != LINK_HREF_END)
                    .filter(|c| !is_marker(*c))
                    .collect();
                Inline::Start(Span::Link { url })
            }
            LINK_CLOSE => Inline::End(SpanKind::Link),
            LINK_HREF_END => continue,
            _ => {
                text.push(c);
                continue;
            }
        };

        if !text.is_empty() {
            inlines.push(Inline::Text(std::mem::take(&mut text)));
        }
        inlines.push(event);
    }

    if !text.is_empty() {
        inlines.push(Inline::Text(text));
    }

    inlines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn link(url: &str) -> Inline {
        Inline::Start(Span::Link {
            url: url.to_string(),
        })
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(substitute("just words"), vec![text("just words")]);
        assert_eq!(substitute(""), Vec::<Inline>::new());
    }

    #[test]
    fn test_strong() {
        assert_eq!(
            substitute("**bold** text"),
            vec![
                Inline::Start(Span::Strong),
                text("bold"),
                Inline::End(SpanKind::Strong),
                text(" text"),
            ]
        );
    }

    #[test]
    fn test_emphasis_after_strong() {
        assert_eq!(
            substitute("**a** and *b*"),
            vec![
                Inline::Start(Span::Strong),
                text("a"),
                Inline::End(SpanKind::Strong),
                text(" and "),
                Inline::Start(Span::Emphasis),
                text("b"),
                Inline::End(SpanKind::Emphasis),
            ]
        );
    }

    #[test]
    fn test_adjacent_bold_italic_misparse() {
        // The strong pass takes "***a**", leaving the emphasis pass to pair
        // the inner "*" with the trailing one.
        assert_eq!(
            substitute("***a***"),
            vec![
                Inline::Start(Span::Strong),
                Inline::Start(Span::Emphasis),
                text("a"),
                Inline::End(SpanKind::Strong),
                Inline::End(SpanKind::Emphasis),
            ]
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            substitute("run `cargo doc` now"),
            vec![
                text("run "),
                Inline::Start(Span::Code),
                text("cargo doc"),
                Inline::End(SpanKind::Code),
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_emphasis_runs_before_code() {
        assert_eq!(
            substitute("`a*b*c`"),
            vec![
                Inline::Start(Span::Code),
                text("a"),
                Inline::Start(Span::Emphasis),
                text("b"),
                Inline::End(SpanKind::Emphasis),
                text("c"),
                Inline::End(SpanKind::Code),
            ]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            substitute("see [docs](https://example.com/docs)."),
            vec![
                text("see "),
                link("https://example.com/docs"),
                text("docs"),
                Inline::End(SpanKind::Link),
                text("."),
            ]
        );
    }

    #[test]
    fn test_link_text_keeps_spans() {
        assert_eq!(
            substitute("[**x**](/y)"),
            vec![
                link("/y"),
                Inline::Start(Span::Strong),
                text("x"),
                Inline::End(SpanKind::Strong),
                Inline::End(SpanKind::Link),
            ]
        );
    }

    #[test]
    fn test_inline_image_syntax_becomes_bang_and_link() {
        assert_eq!(
            substitute("icon ![a](b.png) here"),
            vec![
                text("icon !"),
                link("b.png"),
                text("a"),
                Inline::End(SpanKind::Link),
                text(" here"),
            ]
        );
    }

    #[test]
    fn test_malformed_stays_literal() {
        assert_eq!(substitute("[broken](x"), vec![text("[broken](x")]);
        assert_eq!(substitute("a * b"), vec![text("a * b")]);
        assert_eq!(substitute("`open"), vec![text("`open")]);
    }

    #[test]
    fn test_empty_strong() {
        assert_eq!(
            substitute("****"),
            vec![Inline::Start(Span::Strong), Inline::End(SpanKind::Strong)]
        );
    }

    #[test]
    fn test_marker_chars_in_input_are_dropped() {
        assert_eq!(substitute("a\u{E000}b"), vec![text("ab")]);
    }

    #[test]
    fn test_markers_inside_url_are_dropped() {
        assert_eq!(
            substitute("[t](http://x/**y**)"),
            vec![link("http://x/y"), text("t"), Inline::End(SpanKind::Link)]
        );
    }
}
