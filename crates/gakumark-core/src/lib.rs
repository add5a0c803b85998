//! gakumark-core - block node model, anchor ids and HTML output
//!
//! This crate holds the data shared by the renderer and the heading index
//! in `gakumark`: the block and inline node model, the anchor-id generator
//! both sides must agree on, and the HTML writer the article page and the
//! editor preview use to display rendered nodes.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────┐      ┌────────────┐
//! Markdown ──────▶│ renderer │ ───▶ │ Vec<Node>  │ ──▶ HTML string
//!   source        └──────────┘      └────────────┘
//!     │                                   ▲
//!     │           ┌───────────────┐       │ slugify()
//!     └──────────▶│ heading index │ ──────┘ (same anchor ids)
//!                 └───────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use gakumark_core::{slugify, to_html, Block, Inline, Node, Options, Span, SpanKind};
//!
//! let nodes = vec![
//!     Node::new(0, Block::heading(1, "Hello World")),
//!     Node::new(1, Block::Paragraph(vec![
//!         Inline::Text("This is ".to_string()),
//!         Inline::Start(Span::Strong),
//!         Inline::Text("bold".to_string()),
//!         Inline::End(SpanKind::Strong),
//!     ])),
//! ];
//!
//! assert_eq!(slugify("Hello World"), "hello-world");
//! let html = to_html(&nodes, &Options::default());
//! assert!(html.contains(r#"id="hello-world""#));
//! ```

mod anchor;
mod ast;
mod html;
mod options;

pub use anchor::slugify;
pub use ast::{inlines_plain_text, Block, Inline, ListMarker, Node, SizeHint, Span, SpanKind};
pub use html::{escape_html, to_html, write_inlines};
pub use options::{LinkTarget, Options};
