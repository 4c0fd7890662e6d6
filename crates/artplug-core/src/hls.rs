//! HLS adapter
//!
//! Plays `.m3u8` sources through hls.js bound to the host's video element and
//! mirrors the stream's quality levels and audio tracks into Artplayer's
//! control bar and setting panel.

use crate::{
    adapter::{Capabilities, SourceAdapter},
    config::{HlsConfig, PluginOptions, SelectorConfig},
    host::{HostPlayer, VideoElement},
    selector::{
        audio_selector, default_audio_label, default_quality_label, quality_selector, AudioTrack, LabelFn,
        QualityLevel, SelectorItem, SelectorKind, SelectorPanel,
    },
    Error, Result,
};
use std::cell::RefCell;
use tracing::{debug, error, info, warn};

/// Plugin name reported to the host
pub const PLUGIN_NAME: &str = "hls-plugin";

/// Library name used in notices
pub const LIBRARY_NAME: &str = "HLS.js";

/// True for URLs the HLS adapter applies to
pub fn is_hls_url(url: &str) -> bool {
    url.contains(".m3u8")
}

/// An hls.js instance
pub trait HlsBackend {
    fn levels(&self) -> Vec<QualityLevel>;
    fn audio_tracks(&self) -> Vec<AudioTrack>;

    /// Selected level index, `-1` for automatic
    fn current_level(&self) -> i32;
    fn set_current_level(&self, level: i32) -> Result<()>;

    /// Selected audio track id
    fn audio_track(&self) -> i32;
    fn set_audio_track(&self, id: i32) -> Result<()>;

    fn load_source(&self, url: &str) -> Result<()>;

    /// Bind to the host's video element
    fn attach_media(&self) -> Result<()>;

    /// The attached media element is the host's video element
    fn is_attached_to_host(&self) -> bool;

    fn destroy(&self);
}

/// The `Hls` constructor on the page
pub trait HlsRuntime {
    type Backend: HlsBackend;

    /// `Hls.isSupported()`
    fn is_supported(&self) -> bool;

    /// `new Hls()`
    fn create(&self) -> Result<Self::Backend>;
}

/// Result of [`HlsAdapter::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlsInit {
    /// The source is not an HLS manifest
    NotApplicable,
    /// hls.js drives the video element
    Attached,
    /// The browser plays HLS natively
    Native,
    /// Neither hls.js nor native playback is available
    Unsupported,
}

/// Adapter options
#[derive(Clone, Default)]
pub struct HlsOptions {
    pub config: HlsConfig,
    pub quality: SelectorConfig,
    pub audio: SelectorConfig,
    /// `option.quality.getName`
    pub quality_label: Option<LabelFn<QualityLevel>>,
    /// `option.audio.getName`
    pub audio_label: Option<LabelFn<AudioTrack>>,
}

impl HlsOptions {
    pub fn from_plugin_options(options: &PluginOptions) -> Self {
        Self {
            quality: options.quality.clone(),
            audio: options.audio.clone(),
            ..Default::default()
        }
    }

    fn selector_config(&self, kind: SelectorKind) -> &SelectorConfig {
        match kind {
            SelectorKind::Quality => &self.quality,
            SelectorKind::Audio => &self.audio,
        }
    }
}

/// HLS source adapter
pub struct HlsAdapter<H, V, B> {
    host: H,
    video: V,
    options: HlsOptions,
    backend: RefCell<Option<B>>,
}

impl<H: HostPlayer, V: VideoElement, B: HlsBackend> HlsAdapter<H, V, B> {
    pub fn new(host: H, video: V, options: HlsOptions) -> Self {
        Self {
            host,
            video,
            options,
            backend: RefCell::new(None),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// An hls.js instance is held
    pub fn is_attached(&self) -> bool {
        self.backend.borrow().is_some()
    }

    /// Run `f` against the hls.js instance, if any
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> Option<R> {
        self.backend.borrow().as_ref().map(f)
    }

    /// Start playback of `url` once hls.js is on the page
    pub fn init<R>(&self, runtime: &R, url: &str) -> Result<HlsInit>
    where
        R: HlsRuntime<Backend = B>,
    {
        if !is_hls_url(url) {
            return Ok(HlsInit::NotApplicable);
        }
        info!(url, "Initializing HLS player");

        if runtime.is_supported() {
            self.release_backend();
            let backend = runtime.create()?;
            backend.load_source(url)?;
            backend.attach_media()?;
            *self.backend.borrow_mut() = Some(backend);
            return Ok(HlsInit::Attached);
        }

        warn!("{}", Error::Unsupported(LIBRARY_NAME.to_string()));
        if self.video.can_play_type(&self.options.config.native_mime_type) {
            info!(url, "Falling back to native HLS playback");
            self.video.set_src(url);
            return Ok(HlsInit::Native);
        }

        let err = Error::UnsupportedFormat("m3u8".to_string());
        self.host.show_notice(&err.to_string());
        Ok(HlsInit::Unsupported)
    }

    /// Report a failed hls.js download; no retry
    pub fn script_failed(&self) {
        let err = Error::script_load(LIBRARY_NAME, &self.options.config.script_src);
        error!(code = err.error_code(), src = %self.options.config.script_src, "{err}");
        self.host.show_notice(&err.to_string());
    }

    /// Rebuild the quality and audio selectors from the current stream
    pub fn update(&self) -> Result<()> {
        let (levels, current_level, tracks, current_track) = {
            let backend = self.backend.borrow();
            let backend = backend
                .as_ref()
                .filter(|b| b.is_attached_to_host())
                .ok_or(Error::HlsInstanceMissing)?;
            (
                backend.levels(),
                backend.current_level(),
                backend.audio_tracks(),
                backend.audio_track(),
            )
        };

        if !levels.is_empty() {
            let label = |level: &QualityLevel, index: usize| {
                custom_label(&self.options.quality_label, level, index)
                    .unwrap_or_else(|| default_quality_label(level, index))
            };
            let panel = quality_selector(&levels, current_level, &self.options.quality, &label);
            self.publish(&panel);
        }

        if !tracks.is_empty() {
            let label = |track: &AudioTrack, index: usize| {
                custom_label(&self.options.audio_label, track, index)
                    .unwrap_or_else(|| default_audio_label(track, index))
            };
            let panel = audio_selector(&tracks, current_track, &self.options.audio, &label);
            self.publish(&panel);
        }

        Ok(())
    }

    fn publish(&self, panel: &SelectorPanel) {
        let config = self.options.selector_config(panel.kind);
        debug!(panel = panel.kind.panel_name(), entries = panel.items.len(), "Publishing selector");
        if config.control {
            self.host.update_control(&panel.control_descriptor());
        }
        if config.setting {
            self.host.update_setting(&panel.setting_descriptor());
        }
    }

    /// Apply a choice made in a selector; returns the label to display
    pub fn select(&self, kind: SelectorKind, item: &SelectorItem) -> String {
        let applied = self.with_backend(|backend| match kind {
            SelectorKind::Quality => backend.set_current_level(item.value),
            SelectorKind::Audio => backend.set_audio_track(item.value),
        });
        match applied {
            Some(Ok(())) => {}
            Some(Err(err)) => warn!(panel = kind.panel_name(), value = item.value, %err, "Selection rejected"),
            None => warn!(panel = kind.panel_name(), "Selection without an HLS instance"),
        }

        let config = self.options.selector_config(kind);
        debug!(panel = kind.panel_name(), value = item.value, label = %item.label, "Selector changed");
        self.host
            .show_notice(&format!("{}: {}", config.title_or(kind.default_title()), item.label));
        if config.control {
            self.host.check_control(kind.panel_name(), item);
        }
        if config.setting {
            self.host.check_setting(kind.panel_name(), item);
        }
        item.label.clone()
    }

    /// Destroy the hls.js instance, if any
    pub fn destroy(&self) {
        if self.release_backend() {
            info!("HLS player destroyed");
        }
    }

    fn release_backend(&self) -> bool {
        // Take first so the borrow ends before calling out
        let backend = self.backend.borrow_mut().take();
        match backend {
            Some(backend) => {
                backend.destroy();
                true
            }
            None => false,
        }
    }
}

/// `getName` result, unless absent or empty
fn custom_label<T>(name: &Option<LabelFn<T>>, item: &T, index: usize) -> Option<String> {
    name.as_ref().map(|name| name(item, index)).filter(|label| !label.is_empty())
}

impl<H: HostPlayer, V: VideoElement, B: HlsBackend> SourceAdapter for HlsAdapter<H, V, B> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            update: true,
            destroy: true,
            ..Default::default()
        }
    }

    fn update(&self) -> Result<()> {
        HlsAdapter::update(self)
    }

    fn destroy(&self) {
        HlsAdapter::destroy(self)
    }
}
