//! Rendered node model
//!
//! This module defines the block and inline nodes the renderer produces.
//! Nodes are rebuilt from scratch on every render pass and never diffed, so
//! a node's identity is simply the source line it started on.

use serde::{Deserialize, Serialize};

use crate::anchor::slugify;

/// A block together with the zero-based source line it started on
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub line: usize,
    pub block: Block,
}

impl Node {
    pub fn new(line: usize, block: Block) -> Self {
        Self { line, block }
    }
}

/// A block-level node
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Heading with level (1-3), raw text and its anchor id
    Heading {
        level: u8,
        text: String,
        anchor_id: String,
    },

    /// One non-blank source line with inline spans applied
    Paragraph(Vec<Inline>),

    /// Fenced code, kept verbatim
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
        is_empty: bool,
    },

    /// Single-line block quote
    BlockQuote(Vec<Inline>),

    /// Single-line list item
    ListItem {
        marker: ListMarker,
        content: Vec<Inline>,
    },

    /// Whole-line image with a display size picked from its alt text
    Image {
        alt_text: String,
        url: String,
        size: SizeHint,
    },

    /// Blank source line, displayed as a line break
    Blank,
}

impl Block {
    /// Build a heading, deriving the anchor id from the text
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let anchor_id = slugify(&text);
        Block::Heading {
            level,
            text,
            anchor_id,
        }
    }

    /// Anchor id if this is a heading
    pub fn anchor_id(&self) -> Option<&str> {
        match self {
            Block::Heading { anchor_id, .. } => Some(anchor_id),
            _ => None,
        }
    }

    /// Check if this block shows no text
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Heading { text, .. } => text.trim().is_empty(),
            Block::Paragraph(inlines) | Block::BlockQuote(inlines) => {
                inlines.iter().all(|i| i.is_blank())
            }
            Block::ListItem { content, .. } => content.iter().all(|i| i.is_blank()),
            Block::CodeBlock { is_empty, .. } => *is_empty,
            Block::Image { .. } => false,
            Block::Blank => true,
        }
    }
}

/// Marker in front of a list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    /// `- item`
    Bullet,
    /// `12. item`, keeping the digits exactly as written
    Ordered(String),
}

impl ListMarker {
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Ordered(_))
    }

    /// The literal index digits of an ordered item
    pub fn index(&self) -> Option<&str> {
        match self {
            ListMarker::Ordered(digits) => Some(digits),
            ListMarker::Bullet => None,
        }
    }
}

/// Display width class selected by a keyword in an image's alt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeHint {
    /// No keyword: contained, with capped height
    #[default]
    Default,
    Small,
    Medium,
    Large,
    /// Full container width
    Full,
}

impl SizeHint {
    /// CSS classes for the `<img>` element
    pub fn image_class(self) -> &'static str {
        match self {
            SizeHint::Default => "max-w-full h-auto max-h-96 object-contain",
            SizeHint::Small => "max-w-xs h-auto object-contain",
            SizeHint::Medium => "max-w-md h-auto object-contain",
            SizeHint::Large => "max-w-2xl h-auto object-contain",
            SizeHint::Full => "w-full h-auto object-contain",
        }
    }

    /// CSS classes for the wrapping container
    pub fn container_class(self) -> &'static str {
        match self {
            SizeHint::Full => "my-4",
            _ => "my-4 flex justify-center",
        }
    }
}

/// One event of an inline run.
///
/// Runs are flat rather than nested: the substitution passes run one after
/// another over the same text, and a later pass may close a span that an
/// earlier pass opened inside another one. A flat sequence keeps such
/// overlaps representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Start(Span),
    End(SpanKind),
}

/// An opening inline span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Strong,
    Emphasis,
    Code,
    /// Link opening in a new browsing context
    Link { url: String },
}

impl Span {
    pub fn kind(&self) -> SpanKind {
        match self {
            Span::Strong => SpanKind::Strong,
            Span::Emphasis => SpanKind::Emphasis,
            Span::Code => SpanKind::Code,
            Span::Link { .. } => SpanKind::Link,
        }
    }
}

/// Kind of span closed by [`Inline::End`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Strong,
    Emphasis,
    Code,
    Link,
}

impl Inline {
    /// Check if this inline contributes no visible text
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Start(_) | Inline::End(_) => true,
        }
    }
}

/// Concatenated text of an inline run with all span markup dropped
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .filter_map(|i| match i {
            Inline::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
