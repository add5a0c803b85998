//! Heading index and table-of-contents synchronization
//!
//! Work happens in two named phases:
//!
//! 1. **Pure data.** [`extract_headings`] scans the source with the same
//!    classifier the renderer uses and returns [`HeadingEntry`] values with
//!    their anchor ids already computed.
//! 2. **Id attachment.** After the hosting view has committed the rendered
//!    nodes to its display tree, it calls [`attach_anchor_ids`] with a
//!    [`HeadingHost`] so every heading element gets `id = slugify(text)`.
//!
//! [`TocSync`] then follows scroll and resize ticks from a [`PageLayout`]
//! to keep the active heading and the panel placement current.

use gakumark_core::{escape_html, slugify, Options};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::parse::{BlockScanner, LineKind};

/// One table-of-contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub anchor_id: String,
    pub text: String,
    pub level: u8,
}

/// Extract the headings of a source document, in document order.
///
/// Uses the renderer's own line classifier, so headings inside fenced code
/// are skipped and the anchor ids match the rendered heading nodes.
pub fn extract_headings(source: &str) -> Vec<HeadingEntry> {
    BlockScanner::new(source)
        .filter_map(|(_, kind)| match kind {
            LineKind::Heading { level, text } => Some(HeadingEntry {
                anchor_id: slugify(text),
                text: text.to_string(),
                level,
            }),
            _ => None,
        })
        .collect()
}

/// Ordered heading entries of one document
#[derive(Debug, Clone)]
pub struct TableOfContents {
    entries: Vec<HeadingEntry>,
    /// Anchor id to entry position; a repeated id points at its last entry
    by_anchor: IndexMap<String, usize>,
    open: bool,
}

impl TableOfContents {
    pub fn new(entries: Vec<HeadingEntry>) -> Self {
        let mut by_anchor = IndexMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(previous) = by_anchor.insert(entry.anchor_id.clone(), i) {
                debug!(
                    anchor = %entry.anchor_id,
                    previous,
                    "duplicate heading anchor, later heading shadows earlier one"
                );
            }
        }

        Self {
            entries,
            by_anchor,
            open: true,
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(extract_headings(source))
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn anchor_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.anchor_id.as_str())
    }

    /// Look up an entry by anchor id
    pub fn lookup(&self, anchor_id: &str) -> Option<&HeadingEntry> {
        self.by_anchor
            .get(anchor_id)
            .and_then(|&i| self.entries.get(i))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Collapse or expand the entry list
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Handle a click on an entry.
    ///
    /// Default hash navigation is suppressed; the host performs the
    /// returned smooth scroll instead. Unknown ids yield `None`.
    pub fn navigate(&self, anchor_id: &str) -> Option<ScrollRequest> {
        self.lookup(anchor_id).map(|entry| ScrollRequest {
            anchor_id: entry.anchor_id.clone(),
        })
    }

    /// Render the panel, or `None` when the document has no headings
    pub fn to_html(
        &self,
        active: Option<&str>,
        placement: PanelPlacement,
        options: &Options,
    ) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(256 + self.entries.len() * 128);
        out.push_str("<div");
        if options.styled {
            out.push_str(" class=\"bg-white dark:bg-gray-900 border border-gray-200 dark:border-gray-700 rounded-xl p-4 shadow-sm\"");
        }
        if let PanelPlacement::Fixed { right } = placement {
            out.push_str(&format!(" style=\"position: fixed; top: 6rem; right: {right}px\""));
        }
        out.push('>');

        out.push_str("<button type=\"button\"><h3>目次</h3><span>");
        out.push_str(if self.open { "−" } else { "+" });
        out.push_str("</span></button>");

        if self.open {
            out.push_str("<nav>");
            for entry in &self.entries {
                out.push_str("<a href=\"#");
                out.push_str(&escape_html(&entry.anchor_id));
                out.push('"');
                if options.styled {
                    out.push_str(" class=\"");
                    out.push_str(entry_class(entry, active));
                    out.push('"');
                } else if active == Some(entry.anchor_id.as_str()) {
                    out.push_str(" aria-current=\"location\"");
                }
                out.push('>');
                out.push_str(&escape_html(&entry.text));
                out.push_str("</a>");
            }
            out.push_str("</nav>");
        }

        out.push_str("</div>");
        Some(out)
    }
}

fn entry_class(entry: &HeadingEntry, active: Option<&str>) -> &'static str {
    let is_active = active == Some(entry.anchor_id.as_str());
    match (entry.level, is_active) {
        (1, true) => "block text-sm text-emerald-600 dark:text-emerald-400 font-medium",
        (1, false) => "block text-sm text-gray-600 dark:text-gray-300",
        (2, true) => "block text-sm ml-4 text-emerald-600 dark:text-emerald-400 font-medium",
        (2, false) => "block text-sm ml-4 text-gray-600 dark:text-gray-300",
        (_, true) => "block text-sm ml-8 text-emerald-600 dark:text-emerald-400 font-medium",
        (_, false) => "block text-sm ml-8 text-gray-600 dark:text-gray-300",
    }
}

/// Smooth-scroll request produced by a table-of-contents click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub anchor_id: String,
}

/// The display tree a rendered document was committed to
pub trait HeadingHost {
    /// Handle to one heading element
    type Element;

    /// Rendered heading elements (levels 1-3) in document order
    fn heading_elements(&self) -> Vec<Self::Element>;

    /// Text content of an element, or `None` if it is gone
    fn element_text(&self, element: &Self::Element) -> Option<String>;

    /// Set the element's `id`; returns `false` if it could not be resolved
    fn set_element_id(&mut self, element: &Self::Element, id: &str) -> bool;
}

/// Attach `id = slugify(text)` to every rendered heading element.
///
/// Must run after the rendered nodes are committed to `host`. Elements that
/// cannot be resolved are skipped. Returns the number of ids attached.
pub fn attach_anchor_ids<H: HeadingHost>(host: &mut H) -> usize {
    let mut attached = 0;
    for element in host.heading_elements() {
        let Some(text) = host.element_text(&element) else {
            continue;
        };
        if host.set_element_id(&element, &slugify(&text)) {
            attached += 1;
        }
    }
    trace!(attached, "attached heading anchor ids");
    attached
}

/// Tuning for scroll synchronization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// A heading counts as reached this many pixels before its top
    pub look_ahead: f64,

    /// Article top offset below which the panel becomes fixed
    pub sticky_threshold: f64,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            look_ahead: 100.0,
            sticky_threshold: 100.0,
        }
    }
}

/// Document-relative top offset of a rendered heading
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingOffset {
    pub anchor_id: String,
    pub top: f64,
}

/// Geometry the synchronizer reads on each tick
pub trait PageLayout {
    /// Current vertical scroll position
    fn scroll_y(&self) -> f64;

    /// Viewport width
    fn viewport_width(&self) -> f64;

    /// Rendered headings in document order
    fn heading_offsets(&self) -> Vec<HeadingOffset>;

    /// Top edge of the article relative to the viewport
    fn article_top(&self) -> Option<f64>;

    /// Right edge of the container hosting the panel, relative to the viewport
    fn container_right(&self) -> Option<f64>;
}

/// Where the table-of-contents panel sits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelPlacement {
    /// In normal document flow
    #[default]
    Inline,
    /// Fixed to the viewport, `right` pixels from its right edge
    Fixed { right: f64 },
}

/// What changed during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub active_changed: bool,
    pub placement_changed: bool,
}

/// Scroll synchronizer for one mounted article view
#[derive(Debug, Clone, Default)]
pub struct TocSync {
    config: TocConfig,
    active: Option<String>,
    placement: PanelPlacement,
    mounted: bool,
}

impl TocSync {
    pub fn new(config: TocConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start listening and run one synchronous tick
    pub fn mount(&mut self, layout: &impl PageLayout) -> TickOutcome {
        self.mounted = true;
        self.tick(layout)
    }

    /// Handle a scroll or resize event
    pub fn on_scroll(&mut self, layout: &impl PageLayout) -> TickOutcome {
        if !self.mounted {
            return TickOutcome::default();
        }
        self.tick(layout)
    }

    /// Stop listening and clear all state
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.active = None;
        self.placement = PanelPlacement::Inline;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Anchor id of the heading currently in view
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn placement(&self) -> PanelPlacement {
        self.placement
    }

    fn tick(&mut self, layout: &impl PageLayout) -> TickOutcome {
        let scroll_y = layout.scroll_y();
        let mut outcome = TickOutcome::default();

        // Last heading reached, in document order
        let reached = layout
            .heading_offsets()
            .into_iter()
            .filter(|h| h.top - self.config.look_ahead <= scroll_y)
            .last();

        if let Some(heading) = reached {
            if self.active.as_deref() != Some(heading.anchor_id.as_str()) {
                trace!(anchor = %heading.anchor_id, scroll_y, "active heading changed");
                self.active = Some(heading.anchor_id);
                outcome.active_changed = true;
            }
        }

        if let Some(placement) = self.compute_placement(layout) {
            if placement != self.placement {
                self.placement = placement;
                outcome.placement_changed = true;
            }
        }

        outcome
    }

    fn compute_placement(&self, layout: &impl PageLayout) -> Option<PanelPlacement> {
        let article_top = layout.article_top()?;
        if article_top >= self.config.sticky_threshold {
            return Some(PanelPlacement::Inline);
        }
        let right = layout.viewport_width() - layout.container_right()?;
        Some(PanelPlacement::Fixed { right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePage {
        scroll_y: f64,
        headings: Vec<(&'static str, f64)>,
        article_top: Option<f64>,
        container_right: Option<f64>,
    }

    impl FakePage {
        fn new(headings: Vec<(&'static str, f64)>) -> Self {
            Self {
                scroll_y: 0.0,
                headings,
                article_top: Some(300.0),
                container_right: Some(1100.0),
            }
        }
    }

    impl PageLayout for FakePage {
        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn viewport_width(&self) -> f64 {
            1280.0
        }

        fn heading_offsets(&self) -> Vec<HeadingOffset> {
            self.headings
                .iter()
                .map(|(id, top)| HeadingOffset {
                    anchor_id: id.to_string(),
                    top: *top,
                })
                .collect()
        }

        fn article_top(&self) -> Option<f64> {
            self.article_top
        }

        fn container_right(&self) -> Option<f64> {
            self.container_right
        }
    }

    #[test]
    fn test_extract_headings() {
        let entries = extract_headings("# はじめに\ntext\n## Setup Guide\n### 詳細");
        assert_eq!(
            entries,
            vec![
                HeadingEntry {
                    anchor_id: "はじめに".to_string(),
                    text: "はじめに".to_string(),
                    level: 1,
                },
                HeadingEntry {
                    anchor_id: "setup-guide".to_string(),
                    text: "Setup Guide".to_string(),
                    level: 2,
                },
                HeadingEntry {
                    anchor_id: "詳細".to_string(),
                    text: "詳細".to_string(),
                    level: 3,
                },
            ]
        );
    }

    #[test]
    fn test_extract_skips_fenced_code() {
        let entries = extract_headings("```\n# comment\n```\n# Real");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].anchor_id, "real");
    }

    #[test]
    fn test_duplicate_anchor_shadows() {
        let toc = TableOfContents::from_source("## Notes\n# A\n## Notes");
        assert_eq!(toc.entries().len(), 3);
        assert_eq!(toc.anchor_ids().collect::<Vec<_>>(), vec!["notes", "a", "notes"]);
        let found = toc.lookup("notes").map(|e| e.level);
        assert_eq!(found, Some(2));
        assert!(std::ptr::eq(toc.lookup("notes").unwrap(), &toc.entries()[2]));
    }

    #[test]
    fn test_navigate() {
        let toc = TableOfContents::from_source("# Intro");
        assert_eq!(
            toc.navigate("intro"),
            Some(ScrollRequest {
                anchor_id: "intro".to_string()
            })
        );
        assert_eq!(toc.navigate("missing"), None);
    }

    #[test]
    fn test_empty_toc_renders_nothing() {
        let toc = TableOfContents::from_source("no headings here");
        assert!(toc.is_empty());
        assert_eq!(
            toc.to_html(None, PanelPlacement::Inline, &Options::default()),
            None
        );
    }

    #[test]
    fn test_toc_html() {
        let options = Options {
            styled: false,
            ..Options::default()
        };
        let toc = TableOfContents::from_source("# A\n## B & C");
        let html = toc
            .to_html(Some("b-c"), PanelPlacement::Inline, &options)
            .unwrap();
        assert!(html.contains(r##"<a href="#a">A</a>"##));
        assert!(html.contains(r##"<a href="#b-c" aria-current="location">B &amp; C</a>"##));
    }

    #[test]
    fn test_toc_toggle_hides_entries() {
        let mut toc = TableOfContents::from_source("# A");
        toc.toggle();
        assert!(!toc.is_open());
        let html = toc
            .to_html(None, PanelPlacement::Fixed { right: 24.0 }, &Options::default())
            .unwrap();
        assert!(!html.contains("<nav>"));
        assert!(html.contains("right: 24px"));
    }

    #[test]
    fn test_styled_entries_indent_and_highlight() {
        let toc = TableOfContents::from_source("# A\n## B\n### C");
        let html = toc
            .to_html(Some("a"), PanelPlacement::Inline, &Options::default())
            .unwrap();
        assert!(html.contains("text-emerald-600"));
        assert!(html.contains("ml-4"));
        assert!(html.contains("ml-8"));
    }

    struct FakeHost {
        elements: Vec<Option<(String, Option<String>)>>,
    }

    impl HeadingHost for FakeHost {
        type Element = usize;

        fn heading_elements(&self) -> Vec<usize> {
            (0..self.elements.len()).collect()
        }

        fn element_text(&self, element: &usize) -> Option<String> {
            self.elements[*element].as_ref().map(|(text, _)| text.clone())
        }

        fn set_element_id(&mut self, element: &usize, id: &str) -> bool {
            match self.elements[*element].as_mut() {
                Some((_, slot)) => {
                    *slot = Some(id.to_string());
                    true
                }
                None => false,
            }
        }
    }

    #[test]
    fn test_attach_anchor_ids() {
        let mut host = FakeHost {
            elements: vec![
                Some(("Hello World!".to_string(), None)),
                None,
                Some(("日本語 見出し".to_string(), None)),
            ],
        };
        assert_eq!(attach_anchor_ids(&mut host), 2);
        assert_eq!(
            host.elements[0].as_ref().and_then(|(_, id)| id.clone()),
            Some("hello-world".to_string())
        );
        assert_eq!(
            host.elements[2].as_ref().and_then(|(_, id)| id.clone()),
            Some("日本語-見出し".to_string())
        );
    }

    #[test]
    fn test_mount_runs_one_tick() {
        let mut page = FakePage::new(vec![("intro", 50.0), ("setup", 900.0)]);
        page.scroll_y = 0.0;
        let mut sync = TocSync::new(TocConfig::default());
        let outcome = sync.mount(&page);
        assert!(outcome.active_changed);
        assert_eq!(sync.active(), Some("intro"));
    }

    #[test]
    fn test_active_heading_is_stable_between_headings() {
        let mut page = FakePage::new(vec![("a", 200.0), ("b", 1000.0), ("c", 2000.0)]);
        let mut sync = TocSync::new(TocConfig::default());
        sync.mount(&page);
        assert_eq!(sync.active(), None);

        page.scroll_y = 100.0;
        sync.on_scroll(&page);
        assert_eq!(sync.active(), Some("a"));

        for y in [150.0, 500.0, 899.0] {
            page.scroll_y = y;
            let outcome = sync.on_scroll(&page);
            assert!(!outcome.active_changed);
            assert_eq!(sync.active(), Some("a"));
        }

        page.scroll_y = 900.0;
        assert!(sync.on_scroll(&page).active_changed);
        assert_eq!(sync.active(), Some("b"));

        page.scroll_y = 150.0;
        sync.on_scroll(&page);
        assert_eq!(sync.active(), Some("a"));

        page.scroll_y = 50.0;
        assert!(!sync.on_scroll(&page).active_changed);
        assert_eq!(sync.active(), Some("a"), "no heading reached keeps the pointer");

        page.scroll_y = 5000.0;
        sync.on_scroll(&page);
        assert_eq!(sync.active(), Some("c"));
    }

    #[test]
    fn test_sticky_placement() {
        let mut page = FakePage::new(vec![("a", 200.0)]);
        let mut sync = TocSync::new(TocConfig::default());
        sync.mount(&page);
        assert_eq!(sync.placement(), PanelPlacement::Inline);

        page.article_top = Some(99.0);
        assert!(sync.on_scroll(&page).placement_changed);
        assert_eq!(sync.placement(), PanelPlacement::Fixed { right: 180.0 });

        page.container_right = Some(1000.0);
        sync.on_scroll(&page);
        assert_eq!(sync.placement(), PanelPlacement::Fixed { right: 280.0 });

        page.article_top = Some(100.0);
        sync.on_scroll(&page);
        assert_eq!(sync.placement(), PanelPlacement::Inline);
    }

    #[test]
    fn test_missing_geometry_skips_update() {
        let mut page = FakePage::new(vec![]);
        let mut sync = TocSync::new(TocConfig::default());
        page.article_top = Some(10.0);
        sync.mount(&page);
        assert_eq!(sync.placement(), PanelPlacement::Fixed { right: 180.0 });

        page.container_right = None;
        let outcome = sync.on_scroll(&page);
        assert!(!outcome.placement_changed);
        assert_eq!(sync.placement(), PanelPlacement::Fixed { right: 180.0 });

        page.article_top = None;
        page.container_right = Some(1200.0);
        sync.on_scroll(&page);
        assert_eq!(sync.placement(), PanelPlacement::Fixed { right: 180.0 });
    }

    #[test]
    fn test_unmount_clears_and_ignores_ticks() {
        let mut page = FakePage::new(vec![("a", 0.0)]);
        let mut sync = TocSync::new(TocConfig::default());
        sync.mount(&page);
        assert_eq!(sync.active(), Some("a"));

        sync.unmount();
        assert!(!sync.is_mounted());
        assert_eq!(sync.active(), None);

        page.scroll_y = 10.0;
        assert_eq!(sync.on_scroll(&page), TickOutcome::default());
        assert_eq!(sync.active(), None);
    }
}
