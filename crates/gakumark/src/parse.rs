//! Line classification and block rendering
//!
//! The source is split once on `\n` and each line is classified by the
//! first matching rule: headings, code fences, quotes, bullet items,
//! ordered items, whole-line images, blank lines, and finally paragraphs.
//! There is no nesting and no grouping of consecutive lines except for
//! fenced code.
//!
//! [`BlockScanner`] is shared by [`render`] and the heading index so both
//! see exactly the same headings.

use gakumark_core::{Block, ListMarker, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::image::{size_hint, strip_size_tokens};
use crate::inline::substitute;

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s(.*)$").expect("ordered item pattern is valid"));

static IMAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)$").expect("image pattern is valid"));

const FENCE: &str = "```";

/// A classified source line, or a fenced group of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Heading { level: u8, text: &'a str },
    Fence {
        info: &'a str,
        lines: Vec<&'a str>,
        terminated: bool,
    },
    Quote(&'a str),
    Bullet(&'a str),
    Ordered { index: &'a str, text: &'a str },
    Image { alt: &'a str, url: &'a str },
    Blank,
    Text(&'a str),
}

/// Walks a source document yielding `(line index, kind)` pairs
pub(crate) struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> BlockScanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            lines: source.split('\n').collect(),
            pos: 0,
        }
    }

    fn scan_fence(&mut self, info: &'a str) -> LineKind<'a> {
        let mut lines = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            self.pos += 1;
            if line.starts_with(FENCE) {
                return LineKind::Fence {
                    info,
                    lines,
                    terminated: true,
                };
            }
            lines.push(*line);
        }
        LineKind::Fence {
            info,
            lines,
            terminated: false,
        }
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = (usize, LineKind<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let line = *self.lines.get(start)?;
        self.pos += 1;

        let kind = if let Some(text) = line.strip_prefix("# ") {
            LineKind::Heading { level: 1, text }
        } else if let Some(text) = line.strip_prefix("## ") {
            LineKind::Heading { level: 2, text }
        } else if let Some(text) = line.strip_prefix("### ") {
            LineKind::Heading { level: 3, text }
        } else if let Some(info) = line.strip_prefix(FENCE) {
            self.scan_fence(info.trim())
        } else if let Some(text) = line.strip_prefix("> ") {
            LineKind::Quote(text)
        } else if let Some(text) = line.strip_prefix("- ") {
            LineKind::Bullet(text)
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            let (_, [index, text]) = caps.extract();
            LineKind::Ordered { index, text }
        } else if let Some(caps) = IMAGE_LINE.captures(line) {
            let (_, [alt, url]) = caps.extract();
            LineKind::Image { alt, url }
        } else if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text(line)
        };

        Some((start, kind))
    }
}

/// Render a source document into blocks.
///
/// Eager and stateless: every call re-parses from scratch, and the same
/// input always yields the same nodes. Never fails; malformed syntax falls
/// through to a lower-priority block and an unterminated fence takes the
/// rest of the document.
pub fn render(source: &str) -> Vec<Node> {
    BlockScanner::new(source)
        .map(|(line, kind)| Node::new(line, to_block(line, kind)))
        .collect()
}

fn to_block(line: usize, kind: LineKind<'_>) -> Block {
    match kind {
        LineKind::Heading { level, text } => Block::heading(level, text),

        LineKind::Fence {
            info,
            lines,
            terminated,
        } => {
            if !terminated {
                debug!(line, "code fence is never closed, taking the rest of the document");
            }
            let is_empty = lines.iter().all(|l| l.trim().is_empty());
            Block::CodeBlock {
                language: (!info.is_empty()).then(|| info.to_string()),
                lines: lines.into_iter().map(str::to_string).collect(),
                is_empty,
            }
        }

        LineKind::Quote(text) => Block::BlockQuote(substitute(text)),

        LineKind::Bullet(text) => Block::ListItem {
            marker: ListMarker::Bullet,
            content: substitute(text),
        },

        LineKind::Ordered { index, text } => Block::ListItem {
            marker: ListMarker::Ordered(index.to_string()),
            content: substitute(text),
        },

        LineKind::Image { alt, url } => Block::Image {
            alt_text: strip_size_tokens(alt),
            url: url.to_string(),
            size: size_hint(alt),
        },

        LineKind::Blank => Block::Blank,

        LineKind::Text(text) => Block::Paragraph(substitute(text)),
    }
}
