//! Article metadata helpers
//!
//! Excerpts, read times, title slugs and SEO descriptions derived from an
//! article's raw Markdown. Lengths are counted in `char`s.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Result;

const EXCERPT_CHARS: usize = 100;
const DESCRIPTION_CHARS: usize = 150;
const CHARS_PER_MINUTE: usize = 200;

const NO_EXCERPT: &str = "概要がありません";
const SITE_NAME: &str = "Gaku-Log";
const DEFAULT_KEYWORDS: [&str; 2] = ["ブログ", "学習"];
const DEFAULT_IMAGE: &str =
    "https://images.pexels.com/photos/302899/pexels-photo-302899.jpeg?auto=compress&cs=tinysrgb&w=1200";

static SLUG_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("slug pattern is valid"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static MARKUP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*`]").expect("markup pattern is valid"));
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("newline pattern is valid"));

/// An article as exported from the document store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: u32,
    pub image_url: Option<String>,
    pub slug: String,
}

impl Article {
    /// Parse an article from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Page metadata for this article
    pub fn seo(&self) -> SeoMeta {
        let description = seo_description(&self.content);
        SeoMeta {
            title: format!("{} | {SITE_NAME}", self.title),
            description: if description.is_empty() {
                format!("{} - {SITE_NAME}での学習記録", self.title)
            } else {
                description
            },
            keywords: if self.tags.is_empty() {
                DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
            } else {
                self.tags.clone()
            },
            image: self
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        }
    }
}

/// Title, description, keywords and preview image for a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub image: String,
}

/// First prose line of a document, cut to 100 chars with `...` appended.
///
/// Lines that start like headings, fences, list items or quotes are skipped.
pub fn excerpt(markdown: &str) -> String {
    markdown
        .split('\n')
        .find(|line| {
            !line.trim().is_empty()
                && !["#", "```", "-", "*", ">"].iter().any(|p| line.starts_with(p))
        })
        .map(|line| format!("{}...", truncate_chars(line, EXCERPT_CHARS)))
        .unwrap_or_else(|| NO_EXCERPT.to_string())
}

/// Minutes to read at 200 non-whitespace chars per minute, at least 1
pub fn read_time_minutes(content: &str) -> u32 {
    let chars = content.chars().filter(|c| !c.is_whitespace()).count();
    chars.div_ceil(CHARS_PER_MINUTE).max(1) as u32
}

/// URL slug for an article title.
///
/// Unlike heading anchors, only ASCII word characters survive.
pub fn title_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_DISALLOWED.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "-").trim().to_string()
}

/// Meta description: markup characters removed, line breaks flattened,
/// first 150 chars, `...` when the raw content was longer.
pub fn seo_description(content: &str) -> String {
    let stripped = MARKUP_CHARS.replace_all(content, "");
    let flattened = NEWLINE_RUN.replace_all(&stripped, " ");
    let mut description = truncate_chars(flattened.trim(), DESCRIPTION_CHARS).to_string();
    if content.chars().count() > DESCRIPTION_CHARS {
        description.push_str("...");
    }
    description
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_skips_markup_lines() {
        let source = "# Title\n\n- item\n> quote\n```\nBody text here";
        assert_eq!(excerpt(source), "Body text here...");
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "あ".repeat(120);
        let result = excerpt(&long);
        assert_eq!(result.chars().count(), 103);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_excerpt_missing() {
        assert_eq!(excerpt("# only a heading\n\n"), "概要がありません");
        assert_eq!(excerpt(""), "概要がありません");
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_time_minutes(""), 1);
        assert_eq!(read_time_minutes(&"a".repeat(200)), 1);
        assert_eq!(read_time_minutes(&"a".repeat(201)), 2);
        assert_eq!(read_time_minutes(&"字 ".repeat(400)), 2);
    }

    #[test]
    fn test_title_slug() {
        assert_eq!(title_slug("Hello, Rust World!"), "hello-rust-world");
        assert_eq!(title_slug("Rust 入門"), "rust-");
        assert_eq!(title_slug("snake_case-title"), "snake_case-title");
    }

    #[test]
    fn test_seo_description() {
        assert_eq!(seo_description("# Title\n\n**bold** `code`"), "Title bold code");
        let long = "x".repeat(200);
        let description = seo_description(&long);
        assert_eq!(description.len(), 153);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn test_article_seo_defaults() {
        let article = Article {
            title: "Empty".to_string(),
            content: "###".to_string(),
            ..Article::default()
        };
        let meta = article.seo();
        assert_eq!(meta.title, "Empty | Gaku-Log");
        assert_eq!(meta.description, "Empty - Gaku-Logでの学習記録");
        assert_eq!(meta.keywords, vec!["ブログ", "学習"]);
        assert_eq!(meta.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_article_from_json() {
        let json = r#"{
            "id": "a1",
            "title": "Rust",
            "content": "Hello",
            "tags": ["rust", "blog"],
            "readTime": 3,
            "imageUrl": "https://example.com/a.png",
            "status": "published"
        }"#;
        let article = Article::from_json(json).unwrap();
        assert_eq!(article.read_time, 3);
        assert_eq!(article.image_url.as_deref(), Some("https://example.com/a.png"));
        let meta = article.seo();
        assert_eq!(meta.keywords, vec!["rust", "blog"]);
        assert_eq!(meta.image, "https://example.com/a.png");
    }

    #[test]
    fn test_article_from_bad_json() {
        assert!(Article::from_json("{ not json").is_err());
    }
}
