//! HTML output
//!
//! Turns rendered nodes into the markup the article page and the editor
//! preview display. Text is escaped; span events are written as they come,
//! so an overlapping run produces the same tag sequence it was parsed into.

use crate::ast::{Block, Inline, ListMarker, Node, SizeHint, Span, SpanKind};
use crate::options::{LinkTarget, Options};

const H1_CLASS: &str =
    "text-3xl font-bold text-gray-900 dark:text-gray-100 mt-6 mb-4 first:mt-0 leading-tight";
const H2_CLASS: &str = "text-2xl font-bold text-gray-900 dark:text-gray-100 mt-5 mb-3 leading-tight";
const H3_CLASS: &str =
    "text-xl font-semibold text-gray-900 dark:text-gray-100 mt-4 mb-2 leading-tight";
const PRE_CLASS: &str = "bg-gray-900 text-gray-100 p-4 rounded-lg overflow-x-auto my-3 border border-gray-200 dark:border-gray-700";
const CODE_CLASS: &str = "text-sm font-mono leading-tight";
const EMPTY_CODE_CLASS: &str = "text-gray-400 italic";
const QUOTE_CLASS: &str =
    "border-l-4 border-blue-500 pl-4 py-2 my-3 bg-blue-50 dark:bg-blue-900/20 rounded-r-lg";
const QUOTE_TEXT_CLASS: &str = "text-gray-700 dark:text-gray-300 leading-tight font-medium";
const LIST_ITEM_CLASS: &str =
    "flex items-center text-gray-700 dark:text-gray-300 leading-tight my-1 text-lg";
const BULLET_CLASS: &str = "text-blue-600 dark:text-blue-400 mr-3 text-lg";
const NUMBER_CLASS: &str = "text-blue-600 dark:text-blue-400 mr-2 font-medium min-w-[1.5rem]";
const LIST_TEXT_CLASS: &str = "flex-1";
const FIGURE_CLASS: &str = "relative max-w-full";
const IMAGE_EXTRA_CLASS: &str = "rounded-lg shadow-lg mx-auto";
const CAPTION_CLASS: &str = "text-center text-sm text-gray-500 dark:text-gray-400 mt-2 italic";
const PARAGRAPH_CLASS: &str = "text-gray-700 dark:text-gray-300 leading-tight mb-2 text-lg";
const STRONG_CLASS: &str = "font-semibold text-gray-900 dark:text-gray-100";
const EM_CLASS: &str = "italic";
const INLINE_CODE_CLASS: &str =
    "bg-gray-100 dark:bg-gray-800 px-2 py-1 rounded font-mono text-blue-600 dark:text-blue-400";
const LINK_CLASS: &str = "text-blue-600 dark:text-blue-400 hover:underline";

/// Write rendered nodes as HTML, one block per line
pub fn to_html(nodes: &[Node], options: &Options) -> String {
    let mut output = String::with_capacity(nodes.len() * 96);
    for node in nodes {
        write_block(&node.block, options, &mut output);
        output.push('\n');
    }
    output
}

fn write_block(block: &Block, options: &Options, out: &mut String) {
    match block {
        Block::Heading {
            level,
            text,
            anchor_id,
        } => {
            let (tag, class) = match level {
                1 => ("h1", H1_CLASS),
                2 => ("h2", H2_CLASS),
                _ => ("h3", H3_CLASS),
            };
            open_tag(tag, class, &[("id", anchor_id)], options, out);
            out.push_str(&escape_html(text));
            close_tag(tag, out);
        }

        Block::Paragraph(inlines) => {
            open_tag("p", PARAGRAPH_CLASS, &[], options, out);
            write_inlines(inlines, options, out);
            close_tag("p", out);
        }

        Block::CodeBlock {
            language,
            lines,
            is_empty,
        } => write_code_block(language.as_deref(), lines, *is_empty, options, out),

        Block::BlockQuote(inlines) => {
            open_tag("blockquote", QUOTE_CLASS, &[], options, out);
            open_tag("p", QUOTE_TEXT_CLASS, &[], options, out);
            write_inlines(inlines, options, out);
            close_tag("p", out);
            close_tag("blockquote", out);
        }

        Block::ListItem { marker, content } => {
            open_tag("div", LIST_ITEM_CLASS, &[], options, out);
            match marker {
                ListMarker::Bullet => {
                    open_tag("span", BULLET_CLASS, &[], options, out);
                    out.push('•');
                }
                ListMarker::Ordered(index) => {
                    open_tag("span", NUMBER_CLASS, &[], options, out);
                    out.push_str(&escape_html(index));
                    out.push('.');
                }
            }
            close_tag("span", out);
            open_tag("span", LIST_TEXT_CLASS, &[], options, out);
            write_inlines(content, options, out);
            close_tag("span", out);
            close_tag("div", out);
        }

        Block::Image {
            alt_text,
            url,
            size,
        } => write_image(alt_text, url, *size, options, out),

        Block::Blank => out.push_str("<br />"),
    }
}

fn write_code_block(
    language: Option<&str>,
    lines: &[String],
    is_empty: bool,
    options: &Options,
    out: &mut String,
) {
    open_tag("pre", PRE_CLASS, &[], options, out);
    match language {
        Some(lang) => open_tag("code", CODE_CLASS, &[("data-lang", lang)], options, out),
        None => open_tag("code", CODE_CLASS, &[], options, out),
    }

    if is_empty {
        open_tag("span", EMPTY_CODE_CLASS, &[], options, out);
        out.push_str(&escape_html(&options.empty_code_label));
        close_tag("span", out);
    } else {
        out.push_str(&escape_html(&lines.join("\n")));
    }

    close_tag("code", out);
    close_tag("pre", out);
}

fn write_image(alt_text: &str, url: &str, size: SizeHint, options: &Options, out: &mut String) {
    let alt = if alt_text.is_empty() {
        options.fallback_alt.as_str()
    } else {
        alt_text
    };
    let image_class = format!("{} {}", size.image_class(), IMAGE_EXTRA_CLASS);

    open_tag("div", size.container_class(), &[], options, out);
    open_tag("div", FIGURE_CLASS, &[], options, out);

    out.push_str("<img");
    push_attr("src", url, out);
    push_attr("alt", alt, out);
    if options.styled {
        push_attr("class", &image_class, out);
    }
    push_attr("loading", "lazy", out);
    push_attr("decoding", "async", out);
    out.push_str(" />");

    if !alt_text.is_empty() && alt_text != options.fallback_alt {
        open_tag("p", CAPTION_CLASS, &[], options, out);
        out.push_str(&escape_html(alt_text));
        close_tag("p", out);
    }

    close_tag("div", out);
    close_tag("div", out);
}

/// Write an inline run as HTML
pub fn write_inlines(inlines: &[Inline], options: &Options, out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Start(span) => write_span_start(span, options, out),
            Inline::End(kind) => close_tag(span_tag(*kind), out),
        }
    }
}

fn write_span_start(span: &Span, options: &Options, out: &mut String) {
    match span {
        Span::Strong => open_tag("strong", STRONG_CLASS, &[], options, out),
        Span::Emphasis => open_tag("em", EM_CLASS, &[], options, out),
        Span::Code => open_tag("code", INLINE_CODE_CLASS, &[], options, out),
        Span::Link { url } => match options.link_target {
            LinkTarget::NewContext => open_tag(
                "a",
                LINK_CLASS,
                &[
                    ("href", url),
                    ("target", "_blank"),
                    ("rel", "noopener noreferrer"),
                ],
                options,
                out,
            ),
            LinkTarget::SameContext => open_tag("a", LINK_CLASS, &[("href", url)], options, out),
        },
    }
}

fn span_tag(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Strong => "strong",
        SpanKind::Emphasis => "em",
        SpanKind::Code => "code",
        SpanKind::Link => "a",
    }
}

fn open_tag(tag: &str, class: &str, attrs: &[(&str, &str)], options: &Options, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        push_attr(name, value, out);
    }
    if options.styled && !class.is_empty() {
        push_attr("class", class, out);
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}
