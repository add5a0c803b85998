//! Options for HTML output

use serde::{Deserialize, Serialize};

/// Where rendered links open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// `target="_blank"` with `rel="noopener noreferrer"`
    #[default]
    NewContext,
    /// Plain link in the current page
    SameContext,
}

/// Options for turning rendered nodes into markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Label shown inside a code block with no content
    pub empty_code_label: String,

    /// `alt` attribute used when an image's cleaned alt text is empty.
    /// An alt equal to this is never shown as a caption.
    pub fallback_alt: String,

    /// Link target
    pub link_target: LinkTarget,

    /// Emit the site's CSS classes
    pub styled: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            empty_code_label: "（空のコードブロック）".to_string(),
            fallback_alt: "画像".to_string(),
            link_target: LinkTarget::NewContext,
            styled: true,
        }
    }
}
