//! Plugin configuration
//!
//! `PluginOptions` mirrors the subset of Artplayer's `option` object the
//! adapters read. Every field has a default so a partial option object
//! deserializes cleanly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// hls.js bundle fetched when `window.Hls` is missing
pub const HLS_SCRIPT_SRC: &str = "https://cdn.jsdelivr.net/npm/hls.js/dist/hls.min.js";

/// YouTube iframe API bootstrap script
pub const YOUTUBE_API_SRC: &str = "https://www.youtube.com/iframe_api";

/// MIME type probed for native HLS playback (Safari, iOS)
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Poll period for synthesizing `timeupdate`/`progress` from the embed
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_millis(250);

/// Host options read by the adapters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginOptions {
    /// Source URL (or bare YouTube id)
    pub url: String,
    /// Start playback once the source is ready
    pub autoplay: bool,
    /// Quality selector panel
    pub quality: SelectorConfig,
    /// Audio track selector panel
    pub audio: SelectorConfig,
    /// YouTube progress poll period in milliseconds
    pub sync_interval: Option<u64>,
}

impl PluginOptions {
    /// Options for a source URL with everything else defaulted
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Configuration for one selector panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Panel title shown in the setting menu and notices
    pub title: Option<String>,
    /// Label for the synthetic automatic entry
    pub auto: Option<String>,
    /// Render the selector in the control bar
    pub control: bool,
    /// Render the selector in the setting panel
    pub setting: bool,
}

impl SelectorConfig {
    /// Title, or the given fallback when unset
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    /// Automatic entry label, `Auto` when unset
    pub fn auto_label(&self) -> &str {
        self.auto.as_deref().unwrap_or("Auto")
    }

    /// True when at least one UI surface is enabled
    pub fn is_enabled(&self) -> bool {
        self.control || self.setting
    }
}

/// HLS adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HlsConfig {
    /// Script URL for hls.js
    pub script_src: String,
    /// MIME type for the native playback probe
    pub native_mime_type: String,
}

impl Default for HlsConfig {
    fn default() -> Self {
        Self {
            script_src: HLS_SCRIPT_SRC.to_string(),
            native_mime_type: HLS_MIME_TYPE.to_string(),
        }
    }
}

/// YouTube adapter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct YoutubeConfig {
    /// Script URL for the iframe API
    pub api_src: String,
    /// Period of the synthetic progress events
    pub sync_interval: Duration,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_src: YOUTUBE_API_SRC.to_string(),
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl YoutubeConfig {
    /// Config with a custom poll period
    pub fn with_sync_interval(sync_interval: Duration) -> Self {
        Self {
            sync_interval,
            ..Default::default()
        }
    }

    /// Config for the host options; a missing or zero `syncInterval` keeps the default
    pub fn from_plugin_options(options: &PluginOptions) -> Self {
        match options.sync_interval.filter(|millis| *millis > 0) {
            Some(millis) => Self::with_sync_interval(Duration::from_millis(millis)),
            None => Self::default(),
        }
    }
}
