//! # gakumark
//!
//! Render the Markdown subset used by Gaku-Log articles and keep the
//! article's table of contents in step with the rendered headings.
//!
//! ## Design
//!
//! The renderer is line oriented: each source line becomes at most one
//! block, except fenced code which collects lines until the closing fence.
//! Inline markup is applied by four sequential regex passes (strong,
//! emphasis, code, link) and the result is kept as a flat run of span
//! events, so the quirks of the passes are reproduced exactly.
//!
//! Headings carry an anchor id computed by [`slugify`]. The table of
//! contents is built with the same line classifier, so both sides always
//! agree on which lines are headings and on their ids.
//!
//! ## Example
//!
//! ```rust
//! use gakumark::{MarkdownRenderer, PanelPlacement};
//!
//! let renderer = MarkdownRenderer::new();
//! let article = renderer.render_article("# Hello World\n\nSome **bold** text");
//!
//! assert!(article.html.contains(r#"id="hello-world""#));
//! assert_eq!(article.toc.anchor_ids().collect::<Vec<_>>(), vec!["hello-world"]);
//!
//! let panel = article
//!     .toc
//!     .to_html(Some("hello-world"), PanelPlacement::Inline, renderer.options());
//! assert!(panel.is_some());
//! ```

use std::path::PathBuf;

pub mod ads;
pub mod article;
#[cfg(feature = "html")]
pub mod audit;
pub mod config;
mod image;
mod inline;
mod parse;
mod service;
pub mod toc;

pub use ads::{AdConfig, PageKind};
pub use article::{excerpt, read_time_minutes, seo_description, title_slug, Article, SeoMeta};
#[cfg(feature = "html")]
pub use audit::{audit_anchor_ids, AnchorMismatch, StaticPage};
pub use config::SiteConfig;
pub use image::{size_hint, strip_size_tokens};
pub use inline::substitute;
pub use parse::render;
pub use service::{LinkTarget, MarkdownRenderer, RenderOptions, RenderedArticle};
pub use toc::{
    attach_anchor_ids, extract_headings, HeadingEntry, HeadingHost, HeadingOffset, PageLayout,
    PanelPlacement, ScrollRequest, TableOfContents, TickOutcome, TocConfig, TocSync,
};

pub use gakumark_core::{slugify, to_html, Block, Inline, ListMarker, Node, SizeHint, Span, SpanKind};

/// Error type for gakumark operations
#[derive(Debug, thiserror::Error)]
pub enum GakumarkError {
    #[error("I/O error on {0:?}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid article JSON: {0}")]
    Article(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GakumarkError>;
