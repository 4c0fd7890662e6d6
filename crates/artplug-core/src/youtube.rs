//! YouTube adapter
//!
//! Renders a YouTube iframe embed above the host's (hidden) video element and
//! makes the element's media surface forward to the embed, so Artplayer's
//! controls keep working unmodified.
//!
//! ```text
//!   Artplayer UI ──reads/writes──▶ $video ──proxy──▶ EmbedProxy ──▶ YT.Player
//!        ▲                                                            │
//!        └──── video:* events ◀── YoutubeAdapter ◀── callbacks/poll ──┘
//! ```
//!
//! The iframe API has no continuous time-update callback, so once the embed
//! is ready a timer emits `video:timeupdate` and `video:progress`.

use crate::{
    adapter::{Capabilities, SourceAdapter},
    config::YoutubeConfig,
    host::{HostPlayer, VideoElement},
    media::{embed_volume_to_host, finite_or, host_volume_to_embed, MediaControllable},
    readiness::ReadinessGate,
    types::{state_events, HostEvent, VideoId},
    youtube_id::parse_video_id,
    Error, Result,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Plugin name reported to the host
pub const PLUGIN_NAME: &str = "youtube-plugin";

/// Inline style of the embed container
pub const CONTAINER_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("inset", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "150"),
    ("background", "black"),
];

/// A `YT.Player` instance
///
/// Every call may fail on the JavaScript side; the adapter treats failures
/// as "no answer" and falls back to safe defaults.
pub trait YoutubeEmbed {
    fn play_video(&self) -> Result<()>;
    fn pause_video(&self) -> Result<()>;
    fn stop_video(&self) -> Result<()>;
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()>;
    fn current_time(&self) -> Result<f64>;
    fn duration(&self) -> Result<f64>;
    /// Volume in `[0, 100]`
    fn volume(&self) -> Result<f64>;
    fn set_volume(&self, volume: u8) -> Result<()>;
    fn is_muted(&self) -> Result<bool>;
    fn mute(&self) -> Result<()>;
    fn unmute(&self) -> Result<()>;
    fn playback_rate(&self) -> Result<f64>;
    fn set_playback_rate(&self, rate: f64) -> Result<()>;
    fn destroy(&self) -> Result<()>;
}

/// Recurring timer driving [`YoutubeAdapter::on_tick`]
pub trait IntervalTimer {
    /// Start ticking every `period`; replaces a running interval
    fn start(&self, period: Duration);
    fn stop(&self);
    fn is_active(&self) -> bool;
}

/// The mounted embed container element
pub trait EmbedContainer {
    /// Remove the element from the player root
    fn detach(&self);
}

/// Container to mount before creating the embed
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub id: String,
    pub style: &'static [(&'static str, &'static str)],
}

impl ContainerSpec {
    pub fn for_video(video_id: &VideoId) -> Self {
        Self {
            id: format!("art-youtube-{video_id}"),
            style: &CONTAINER_STYLE,
        }
    }
}

/// Options object for `new YT.Player(container, options)`; the bindings add `events`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOptions {
    pub video_id: VideoId,
    pub width: &'static str,
    pub height: &'static str,
    pub player_vars: PlayerVars,
}

/// `playerVars` of the embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerVars {
    pub playsinline: u8,
    pub autoplay: u8,
    pub controls: u8,
    pub rel: u8,
    pub iv_load_policy: u8,
    pub modestbranding: u8,
}

impl PlayerVars {
    pub fn new(autoplay: bool) -> Self {
        Self {
            playsinline: 1,
            autoplay: u8::from(autoplay),
            controls: 1,
            rel: 0,
            iv_load_policy: 3,
            modestbranding: 1,
        }
    }
}

impl EmbedOptions {
    pub fn new(video_id: VideoId, autoplay: bool) -> Self {
        Self {
            video_id,
            width: "100%",
            height: "100%",
            player_vars: PlayerVars::new(autoplay),
        }
    }
}

// Embed handle plus the gate guarding every call into it
struct EmbedSlot<E> {
    gate: ReadinessGate,
    embed: RefCell<Option<E>>,
}

impl<E: YoutubeEmbed> EmbedSlot<E> {
    fn new() -> Self {
        Self {
            gate: ReadinessGate::new(),
            embed: RefCell::new(None),
        }
    }

    fn has_embed(&self) -> bool {
        self.embed.borrow().is_some()
    }

    fn query<T>(&self, default: T, f: impl FnOnce(&E) -> Result<T>) -> T {
        if !self.gate.is_ready() {
            return default;
        }
        match self.embed.borrow().as_ref() {
            Some(embed) => f(embed).unwrap_or_else(|err| {
                // Remote-control failures are swallowed
                debug!(code = err.error_code(), "{err}");
                default
            }),
            None => default,
        }
    }

    fn call(&self, f: impl FnOnce(&E) -> Result<()>) {
        self.query((), f)
    }
}

/// `MediaControllable` backed by the embed
///
/// Reads return 0 / 1 / false until the embed is ready.
pub struct EmbedProxy<E> {
    slot: Rc<EmbedSlot<E>>,
}

impl<E> Clone for EmbedProxy<E> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<E: YoutubeEmbed> MediaControllable for EmbedProxy<E> {
    fn current_time(&self) -> f64 {
        finite_or(self.slot.query(0.0, |e| e.current_time()), 0.0)
    }

    fn set_current_time(&self, seconds: f64) {
        let seconds = finite_or(seconds, 0.0);
        self.slot.call(|e| e.seek_to(seconds, true));
    }

    fn duration(&self) -> f64 {
        finite_or(self.slot.query(0.0, |e| e.duration()), 0.0)
    }

    fn volume(&self) -> f64 {
        embed_volume_to_host(self.slot.query(f64::NAN, |e| e.volume()))
    }

    fn set_volume(&self, volume: f64) {
        if let Some(volume) = host_volume_to_embed(volume) {
            self.slot.call(|e| e.set_volume(volume));
        }
    }

    fn muted(&self) -> bool {
        self.slot.query(false, |e| e.is_muted())
    }

    fn set_muted(&self, muted: bool) {
        self.slot.call(|e| if muted { e.mute() } else { e.unmute() });
    }

    fn playback_rate(&self) -> f64 {
        finite_or(self.slot.query(1.0, |e| e.playback_rate()), 1.0)
    }

    fn set_playback_rate(&self, rate: f64) {
        let rate = if rate.is_finite() && rate != 0.0 { rate } else { 1.0 };
        self.slot.call(|e| e.set_playback_rate(rate));
    }

    fn play(&self) {
        self.slot.call(|e| e.play_video());
    }

    fn pause(&self) {
        self.slot.call(|e| e.pause_video());
    }
}

/// YouTube source adapter
pub struct YoutubeAdapter<H, V, E, T> {
    host: H,
    video: V,
    timer: T,
    config: YoutubeConfig,
    autoplay: bool,
    slot: Rc<EmbedSlot<E>>,
    video_id: RefCell<Option<VideoId>>,
    container: RefCell<Option<Box<dyn EmbedContainer>>>,
}

impl<H, V, E, T> YoutubeAdapter<H, V, E, T>
where
    H: HostPlayer,
    V: VideoElement,
    E: YoutubeEmbed + 'static,
    T: IntervalTimer,
{
    pub fn new(host: H, video: V, timer: T, config: YoutubeConfig, autoplay: bool) -> Self {
        Self {
            host,
            video,
            timer,
            config,
            autoplay,
            slot: Rc::new(EmbedSlot::new()),
            video_id: RefCell::new(None),
            container: RefCell::new(None),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.gate.is_ready()
    }

    pub fn video_id(&self) -> Option<VideoId> {
        self.video_id.borrow().clone()
    }

    /// Media surface forwarding to the embed
    pub fn proxy(&self) -> EmbedProxy<E> {
        EmbedProxy {
            slot: Rc::clone(&self.slot),
        }
    }

    /// Resolve the source; on failure show a notice and create nothing
    pub fn prepare(&self, input: &str) -> Option<ContainerSpec> {
        let Some(video_id) = parse_video_id(input) else {
            warn!(input, "Not a YouTube source");
            self.host.show_notice(&Error::InvalidYoutubeUrl.to_string());
            return None;
        };
        info!(video_id = %video_id, "Initializing YouTube player");
        let spec = ContainerSpec::for_video(&video_id);
        *self.video_id.borrow_mut() = Some(video_id);
        Some(spec)
    }

    /// Keep the mounted container for teardown
    pub fn mount_container(&self, container: Box<dyn EmbedContainer>) {
        if self.video_id.borrow().is_none() {
            container.detach();
            return;
        }
        let previous = self.container.borrow_mut().replace(container);
        if let Some(previous) = previous {
            previous.detach();
        }
    }

    /// Embed options, or `None` once torn down
    pub fn embed_options(&self) -> Option<EmbedOptions> {
        self.video_id
            .borrow()
            .clone()
            .map(|video_id| EmbedOptions::new(video_id, self.autoplay))
    }

    /// Take ownership of a freshly created embed
    ///
    /// Returns false, destroying the embed, if the adapter was torn down in
    /// the meantime.
    pub fn attach_embed(&self, embed: E) -> bool {
        if self.video_id.borrow().is_none() {
            debug!("Embed arrived after teardown");
            if let Err(err) = embed.destroy() {
                debug!(code = err.error_code(), "{err}");
            }
            return false;
        }
        let previous = self.slot.embed.borrow_mut().replace(embed);
        if let Some(previous) = previous {
            if let Err(err) = previous.destroy() {
                debug!(code = err.error_code(), "{err}");
            }
        }
        true
    }

    /// `onReady`: install the proxy and start synthesizing progress events
    pub fn on_ready(&self) {
        if !self.slot.has_embed() || !self.slot.gate.mark_ready() {
            return;
        }
        info!("YouTube player ready");

        self.video.set_hidden(true);
        self.video.install_proxy(Rc::new(self.proxy()));

        self.timer.stop();
        self.timer.start(self.config.sync_interval);

        self.host.set_loading(false);
        self.host.emit(HostEvent::LoadedMetadata, None);
        self.host.emit(HostEvent::CanPlay, None);

        if self.autoplay {
            self.slot.call(|e| e.play_video());
        }
    }

    /// Timer tick
    pub fn on_tick(&self) {
        if !self.slot.gate.is_ready() || !self.slot.has_embed() {
            return;
        }
        self.host.emit(HostEvent::TimeUpdate, None);
        self.host.emit(HostEvent::Progress, None);
    }

    /// `onStateChange`
    pub fn on_state_change(&self, code: i32) {
        if !self.slot.has_embed() {
            return;
        }
        debug!(code, "Embed state changed");
        for (event, data) in state_events(code) {
            self.host.emit(event, data);
        }
    }

    /// `onPlaybackRateChange`
    pub fn on_playback_rate_change(&self, rate: f64) {
        if !self.slot.has_embed() {
            return;
        }
        self.host.emit(HostEvent::RateChange, Some(rate));
    }

    /// Tear everything down; safe to call repeatedly or before init
    pub fn destroy(&self) {
        self.timer.stop();
        let was_ready = self.slot.gate.reset();

        let embed = self.slot.embed.borrow_mut().take();
        let had_embed = embed.is_some();
        if let Some(embed) = embed {
            if let Err(err) = embed.destroy() {
                debug!(code = err.error_code(), "{err}");
            }
        }

        let container = self.container.borrow_mut().take();
        if let Some(container) = container {
            container.detach();
        }

        if was_ready {
            self.video.remove_proxy();
        }
        self.video.set_hidden(false);

        if self.video_id.borrow_mut().take().is_some() || had_embed {
            info!("YouTube player destroyed");
        }
    }

    /// Start playback through the element
    pub fn start(&self) {
        self.video.play();
    }

    /// Stop the embed when ready, else pause the native element
    pub fn stop(&self) {
        if self.slot.gate.is_ready() && self.slot.has_embed() {
            self.slot.call(|e| e.stop_video());
        } else {
            self.video.pause();
        }
    }

    pub fn mute(&self) {
        self.video.set_muted(true);
    }
}

impl<H, V, E, T> SourceAdapter for YoutubeAdapter<H, V, E, T>
where
    H: HostPlayer,
    V: VideoElement,
    E: YoutubeEmbed + 'static,
    T: IntervalTimer,
{
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            destroy: true,
            start: true,
            stop: true,
            mute: true,
            ..Default::default()
        }
    }

    fn destroy(&self) {
        YoutubeAdapter::destroy(self)
    }

    fn start(&self) {
        YoutubeAdapter::start(self)
    }

    fn stop(&self) {
        YoutubeAdapter::stop(self)
    }

    fn mute(&self) {
        YoutubeAdapter::mute(self)
    }
}
