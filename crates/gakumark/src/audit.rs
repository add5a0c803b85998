//! Heading ids in committed HTML
//!
//! [`StaticPage`] is a [`HeadingHost`] over already rendered markup, parsed
//! with scraper. It lets anchor ids be attached to, or checked against,
//! pages that were produced outside this crate.

use gakumark_core::slugify;
use scraper::{ElementRef, Html};

use crate::toc::HeadingHost;

/// A level 1-3 heading found in an HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeading {
    pub level: u8,
    pub text: String,
    pub id: Option<String>,
}

/// Headings of a parsed HTML page, in document order
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    headings: Vec<RenderedHeading>,
}

impl StaticPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_fragment(html);
        let headings = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|element| {
                let level = match element.value().name() {
                    "h1" => 1,
                    "h2" => 2,
                    "h3" => 3,
                    _ => return None,
                };
                Some(RenderedHeading {
                    level,
                    text: element.text().collect(),
                    id: element.value().attr("id").map(str::to_string),
                })
            })
            .collect();

        Self { headings }
    }

    pub fn headings(&self) -> &[RenderedHeading] {
        &self.headings
    }
}

impl HeadingHost for StaticPage {
    type Element = usize;

    fn heading_elements(&self) -> Vec<usize> {
        (0..self.headings.len()).collect()
    }

    fn element_text(&self, element: &usize) -> Option<String> {
        self.headings.get(*element).map(|h| h.text.clone())
    }

    fn set_element_id(&mut self, element: &usize, id: &str) -> bool {
        match self.headings.get_mut(*element) {
            Some(heading) => {
                heading.id = Some(id.to_string());
                true
            }
            None => false,
        }
    }
}

/// A heading whose id does not match the anchor derived from its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMismatch {
    pub level: u8,
    pub text: String,
    pub expected: String,
    pub found: Option<String>,
}

/// Check every heading of `html` against `slugify(text)`
pub fn audit_anchor_ids(html: &str) -> Vec<AnchorMismatch> {
    StaticPage::parse(html)
        .headings
        .into_iter()
        .filter_map(|heading| {
            let expected = slugify(&heading.text);
            if heading.id.as_deref() == Some(expected.as_str()) {
                return None;
            }
            Some(AnchorMismatch {
                level: heading.level,
                text: heading.text,
                expected,
                found: heading.id,
            })
        })
        .collect()
}
