//! Ad display settings
//!
//! A plain settings value handed to the views that place ads. Loading and
//! saving happen at the composition root through [`crate::SiteConfig`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pages that may carry ads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Article,
    ArticleList,
    About,
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "home" => Ok(PageKind::Home),
            "article" => Ok(PageKind::Article),
            "article_list" | "articles" => Ok(PageKind::ArticleList),
            "about" => Ok(PageKind::About),
            other => Err(format!("unknown page kind `{other}`")),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Home => "home",
            PageKind::Article => "article",
            PageKind::ArticleList => "article_list",
            PageKind::About => "about",
        };
        f.write_str(name)
    }
}

/// Ad unit slot ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdSlots {
    pub header: String,
    pub sidebar: String,
    pub in_article: String,
    pub article_list: String,
    pub footer: String,
}

impl Default for AdSlots {
    fn default() -> Self {
        Self {
            header: "1234567890".to_string(),
            sidebar: "1234567891".to_string(),
            in_article: "1234567892".to_string(),
            article_list: "1234567893".to_string(),
            footer: "1234567894".to_string(),
        }
    }
}

/// Which pages show ads, and how often inside articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_on_home_page: bool,
    pub show_on_article_page: bool,
    pub show_on_article_list_page: bool,
    pub show_on_about_page: bool,
    /// Place an in-article ad every this many paragraphs; 0 disables them
    pub in_article_frequency: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_on_home_page: true,
            show_on_article_page: true,
            show_on_article_list_page: true,
            show_on_about_page: false,
            in_article_frequency: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub background_color: String,
    pub border_color: String,
    pub border_radius: u32,
    pub margin: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            background_color: "#f9f9f9".to_string(),
            border_color: "#e0e0e0".to_string(),
            border_radius: 8,
            margin: 16,
        }
    }
}

/// Ad configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdConfig {
    pub enabled: bool,
    pub ad_sense_enabled: bool,
    pub affiliate_enabled: bool,
    pub sponsor_enabled: bool,
    pub ad_sense_client_id: String,
    pub slots: AdSlots,
    pub display: DisplaySettings,
    pub style: StyleSettings,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // Stays off until the AdSense account is approved
            ad_sense_enabled: false,
            affiliate_enabled: false,
            sponsor_enabled: false,
            ad_sense_client_id: "ca-pub-XXXXXXXXXXXXXXXX".to_string(),
            slots: AdSlots::default(),
            display: DisplaySettings::default(),
            style: StyleSettings::default(),
        }
    }
}

impl AdConfig {
    /// Ads are on globally and at least one ad source is on
    pub fn is_ad_enabled(&self) -> bool {
        self.enabled && (self.ad_sense_enabled || self.affiliate_enabled || self.sponsor_enabled)
    }

    pub fn should_show_on_page(&self, page: PageKind) -> bool {
        if !self.is_ad_enabled() {
            return false;
        }
        match page {
            PageKind::Home => self.display.show_on_home_page,
            PageKind::Article => self.display.show_on_article_page,
            PageKind::ArticleList => self.display.show_on_article_list_page,
            PageKind::About => self.display.show_on_about_page,
        }
    }

    /// Admins never see ads
    pub fn should_display_ad(&self, page: PageKind, is_admin: bool) -> bool {
        !is_admin && self.should_show_on_page(page)
    }

    /// Whether an ad goes after paragraph `index` of `total`.
    ///
    /// Only the article page setting is consulted; whether ads show at all
    /// is [`AdConfig::should_display_ad`]'s call. Never within the first two
    /// or last two paragraphs.
    pub fn should_show_in_article_ad(&self, index: usize, total: usize) -> bool {
        if !self.display.show_on_article_page {
            return false;
        }
        if index < 2 || index > total.saturating_sub(2) {
            return false;
        }
        match self.display.in_article_frequency {
            0 => false,
            every => index % every == 0,
        }
    }
}
