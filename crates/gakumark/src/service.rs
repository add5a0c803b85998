//! MarkdownRenderer - the main entry point for rendering article bodies.

use gakumark_core::{to_html, Node};
use tracing::debug;

use crate::parse::render;
use crate::toc::TableOfContents;

// Re-export options from core
pub use gakumark_core::{LinkTarget, Options as RenderOptions};

/// Phase-one output for one article body: nodes, their markup and the
/// table of contents, all computed from the same source string
#[derive(Debug, Clone)]
pub struct RenderedArticle {
    pub nodes: Vec<Node>,
    pub html: String,
    pub toc: TableOfContents,
}

/// The renderer used by the article page and the editor preview
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a MarkdownRenderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownRenderer with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render source into block nodes
    pub fn render(&self, source: &str) -> Vec<Node> {
        render(source)
    }

    /// Render source straight to HTML
    pub fn render_html(&self, source: &str) -> String {
        to_html(&render(source), &self.options)
    }

    /// Render an article body together with its table of contents
    pub fn render_article(&self, source: &str) -> RenderedArticle {
        let nodes = render(source);
        let html = to_html(&nodes, &self.options);
        let toc = TableOfContents::from_source(source);
        debug!(
            blocks = nodes.len(),
            headings = toc.entries().len(),
            "rendered article"
        );

        RenderedArticle { nodes, html, toc }
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }
}
