//! Site configuration (`gakumark.toml`)
//!
//! Every section is optional; missing keys keep their defaults.
//!
//! ```toml
//! [render]
//! empty_code_label = "(empty)"
//! link_target = "same_context"
//!
//! [toc]
//! look_ahead = 80.0
//!
//! [ads]
//! ad_sense_enabled = true
//!
//! [ads.display]
//! in_article_frequency = 4
//! ```

use std::fs;
use std::io;
use std::path::Path;

use gakumark_core::Options;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ads::AdConfig;
use crate::toc::TocConfig;
use crate::{GakumarkError, Result};

pub const CONFIG_FILE: &str = "gakumark.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub render: Options,
    pub toc: TocConfig,
    pub ads: AdConfig,
}

impl SiteConfig {
    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(GakumarkError::Io(path.to_path_buf(), err)),
        };
        debug!(path = %path.display(), "loading config");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the full configuration, defaults included, to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|err| GakumarkError::Io(path.to_path_buf(), err))
    }
}
