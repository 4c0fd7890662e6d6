//! Integration tests for Artplug Core

use artplug_core::{
    selector::{ControlDescriptor, SettingDescriptor},
    Capabilities, EmbedContainer, Error, HlsAdapter, HlsBackend, HlsInit, HlsOptions, HlsRuntime, HostEvent,
    HostPlayer, IntervalTimer, MediaControllable, PluginOptions, QualityLevel, AudioTrack, Result, SelectorItem,
    SelectorKind, SourceAdapter, VideoElement, YoutubeAdapter, YoutubeConfig, YoutubeEmbed,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// Host fakes
// =============================================================================

#[derive(Default)]
struct RecordingHost {
    events: RefCell<Vec<(String, Option<f64>)>>,
    notices: RefCell<Vec<String>>,
    loading: RefCell<Vec<bool>>,
    controls: RefCell<Vec<ControlDescriptor>>,
    settings: RefCell<Vec<SettingDescriptor>>,
    checks: RefCell<Vec<(&'static str, String, i32)>>,
}

impl RecordingHost {
    fn event_names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|(name, _)| name.clone()).collect()
    }
}

impl HostPlayer for RecordingHost {
    fn emit(&self, event: HostEvent, data: Option<f64>) {
        self.events.borrow_mut().push((event.name(), data));
    }

    fn show_notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn set_loading(&self, show: bool) {
        self.loading.borrow_mut().push(show);
    }

    fn update_control(&self, descriptor: &ControlDescriptor) {
        self.controls.borrow_mut().push(descriptor.clone());
    }

    fn check_control(&self, panel: &str, item: &SelectorItem) {
        self.checks.borrow_mut().push(("control", panel.to_string(), item.value));
    }

    fn update_setting(&self, descriptor: &SettingDescriptor) {
        self.settings.borrow_mut().push(descriptor.clone());
    }

    fn check_setting(&self, panel: &str, item: &SelectorItem) {
        self.checks.borrow_mut().push(("setting", panel.to_string(), item.value));
    }
}

#[derive(Default)]
struct FakeVideo {
    hidden: Cell<bool>,
    src: RefCell<Option<String>>,
    native_hls: bool,
    native_plays: Cell<u32>,
    native_pauses: Cell<u32>,
    native_muted: Cell<bool>,
    proxy: RefCell<Option<Rc<dyn MediaControllable>>>,
    proxy_removals: Cell<u32>,
}

impl FakeVideo {
    fn proxy(&self) -> Option<Rc<dyn MediaControllable>> {
        self.proxy.borrow().clone()
    }
}

impl VideoElement for FakeVideo {
    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    fn can_play_type(&self, _mime: &str) -> bool {
        self.native_hls
    }

    fn set_src(&self, url: &str) {
        *self.src.borrow_mut() = Some(url.to_string());
    }

    fn play(&self) {
        match self.proxy() {
            Some(proxy) => proxy.play(),
            None => self.native_plays.set(self.native_plays.get() + 1),
        }
    }

    fn pause(&self) {
        match self.proxy() {
            Some(proxy) => proxy.pause(),
            None => self.native_pauses.set(self.native_pauses.get() + 1),
        }
    }

    fn set_muted(&self, muted: bool) {
        match self.proxy() {
            Some(proxy) => proxy.set_muted(muted),
            None => self.native_muted.set(muted),
        }
    }

    fn install_proxy(&self, proxy: Rc<dyn MediaControllable>) {
        *self.proxy.borrow_mut() = Some(proxy);
    }

    fn remove_proxy(&self) {
        self.proxy.borrow_mut().take();
        self.proxy_removals.set(self.proxy_removals.get() + 1);
    }
}

// =============================================================================
// hls.js fakes
// =============================================================================

#[derive(Default)]
struct HlsState {
    levels: Vec<QualityLevel>,
    tracks: Vec<AudioTrack>,
    current_level: Cell<i32>,
    audio_track: Cell<i32>,
    source: RefCell<Option<String>>,
    attached: Cell<bool>,
    foreign_media: Cell<bool>,
    reject_selection: Cell<bool>,
    destroyed: Cell<u32>,
}

impl HlsState {
    fn check_selection(&self, property: &str) -> Result<()> {
        if self.reject_selection.get() {
            return Err(Error::Host(format!("{property}: level out of range")));
        }
        Ok(())
    }
}

#[derive(Clone)]
struct FakeHls(Rc<HlsState>);

impl HlsBackend for FakeHls {
    fn levels(&self) -> Vec<QualityLevel> {
        self.0.levels.clone()
    }

    fn audio_tracks(&self) -> Vec<AudioTrack> {
        self.0.tracks.clone()
    }

    fn current_level(&self) -> i32 {
        self.0.current_level.get()
    }

    fn set_current_level(&self, level: i32) -> Result<()> {
        self.0.check_selection("currentLevel")?;
        self.0.current_level.set(level);
        Ok(())
    }

    fn audio_track(&self) -> i32 {
        self.0.audio_track.get()
    }

    fn set_audio_track(&self, id: i32) -> Result<()> {
        self.0.check_selection("audioTrack")?;
        self.0.audio_track.set(id);
        Ok(())
    }

    fn load_source(&self, url: &str) -> Result<()> {
        *self.0.source.borrow_mut() = Some(url.to_string());
        Ok(())
    }

    fn attach_media(&self) -> Result<()> {
        self.0.attached.set(true);
        Ok(())
    }

    fn is_attached_to_host(&self) -> bool {
        self.0.attached.get() && !self.0.foreign_media.get()
    }

    fn destroy(&self) {
        self.0.destroyed.set(self.0.destroyed.get() + 1);
    }
}

struct FakeHlsRuntime {
    supported: bool,
    instance: Rc<HlsState>,
}

impl FakeHlsRuntime {
    fn new(levels: Vec<QualityLevel>, tracks: Vec<AudioTrack>) -> Self {
        let state = HlsState {
            levels,
            tracks,
            ..Default::default()
        };
        state.current_level.set(-1);
        Self {
            supported: true,
            instance: Rc::new(state),
        }
    }
}

impl HlsRuntime for FakeHlsRuntime {
    type Backend = FakeHls;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self) -> Result<FakeHls> {
        Ok(FakeHls(Rc::clone(&self.instance)))
    }
}

const MANIFEST: &str = "https://cdn.example.com/live/master.m3u8";

type TestHls = HlsAdapter<Rc<RecordingHost>, Rc<FakeVideo>, FakeHls>;

fn hls_adapter(quality: (bool, bool), audio: (bool, bool)) -> (TestHls, Rc<RecordingHost>, Rc<FakeVideo>) {
    let host = Rc::new(RecordingHost::default());
    let video = Rc::new(FakeVideo::default());
    let mut plugin = PluginOptions::with_url(MANIFEST);
    plugin.quality.control = quality.0;
    plugin.quality.setting = quality.1;
    plugin.audio.control = audio.0;
    plugin.audio.setting = audio.1;
    let adapter = HlsAdapter::new(Rc::clone(&host), Rc::clone(&video), HlsOptions::from_plugin_options(&plugin));
    (adapter, host, video)
}

fn ladder() -> Vec<QualityLevel> {
    [360, 720, 720, 1080].into_iter().map(QualityLevel::with_height).collect()
}

fn tracks() -> Vec<AudioTrack> {
    vec![
        AudioTrack { id: 0, name: Some("English".into()), lang: Some("en".into()) },
        AudioTrack { id: 1, name: None, lang: Some("es".into()) },
    ]
}

// =============================================================================
// HLS Tests
// =============================================================================

#[test]
fn test_hls_not_applicable() {
    let (adapter, host, _) = hls_adapter((true, true), (false, false));
    let runtime = FakeHlsRuntime::new(ladder(), vec![]);

    assert_eq!(adapter.init(&runtime, "https://cdn.example.com/clip.mp4").unwrap(), HlsInit::NotApplicable);
    assert!(!adapter.is_attached());
    assert!(host.notices.borrow().is_empty());
}

#[test]
fn test_hls_attach_and_update() {
    let (adapter, host, _) = hls_adapter((true, true), (true, false));
    let runtime = FakeHlsRuntime::new(ladder(), tracks());

    assert_eq!(adapter.init(&runtime, MANIFEST).unwrap(), HlsInit::Attached);
    assert_eq!(runtime.instance.source.borrow().as_deref(), Some(MANIFEST));
    assert!(runtime.instance.attached.get());
    assert_eq!(adapter.with_backend(|hls| hls.levels().len()), Some(4));

    adapter.update().unwrap();

    let controls = host.controls.borrow();
    assert_eq!(controls.len(), 2);
    assert_eq!(controls[0].name, "hls-quality");
    assert_eq!(controls[0].html, "Auto");
    let labels: Vec<_> = controls[0].selector.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["1080P", "720P", "360P", "Auto"]);
    assert!(controls[0].selector[3].is_default);

    assert_eq!(controls[1].name, "hls-audio");
    assert_eq!(controls[1].html, "English");
    let labels: Vec<_> = controls[1].selector.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["English", "es"]);

    // audio has no setting surface enabled
    let settings = host.settings.borrow();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0].name, "hls-quality");
    assert_eq!(settings[0].html, "Quality");
    assert_eq!(settings[0].icon, "quality");
}

#[test]
fn test_hls_update_skips_empty_lists() {
    let (adapter, host, _) = hls_adapter((true, true), (true, true));
    let runtime = FakeHlsRuntime::new(vec![], tracks());
    adapter.init(&runtime, MANIFEST).unwrap();

    adapter.update().unwrap();
    assert!(host.controls.borrow().iter().all(|c| c.name == "hls-audio"));
    assert_eq!(host.controls.borrow().len(), 1);
}

#[test]
fn test_hls_update_requires_instance() {
    let (adapter, host, _) = hls_adapter((true, false), (false, false));
    assert!(matches!(adapter.update(), Err(Error::HlsInstanceMissing)));

    let runtime = FakeHlsRuntime::new(ladder(), vec![]);
    adapter.init(&runtime, MANIFEST).unwrap();
    runtime.instance.foreign_media.set(true);
    let err = adapter.update().unwrap_err();
    assert_eq!(err.to_string(), "Cannot find instance of HLS from \"art.hls\"");
    assert!(host.controls.borrow().is_empty());
}

#[test]
fn test_hls_select_quality() {
    let (adapter, host, _) = hls_adapter((true, true), (false, false));
    let runtime = FakeHlsRuntime::new(ladder(), vec![]);
    adapter.init(&runtime, MANIFEST).unwrap();

    let label = adapter.select(SelectorKind::Quality, &SelectorItem::new("720P", 1, false));

    assert_eq!(label, "720P");
    assert_eq!(runtime.instance.current_level.get(), 1);
    assert_eq!(host.notices.borrow().as_slice(), ["Quality: 720P"]);
    assert_eq!(
        host.checks.borrow().as_slice(),
        [("control", "hls-quality".to_string(), 1), ("setting", "hls-quality".to_string(), 1)]
    );
}

#[test]
fn test_hls_select_audio() {
    let (adapter, host, _) = hls_adapter((false, false), (false, true));
    let runtime = FakeHlsRuntime::new(vec![], tracks());
    adapter.init(&runtime, MANIFEST).unwrap();

    adapter.select(SelectorKind::Audio, &SelectorItem::new("es", 1, false));

    assert_eq!(runtime.instance.audio_track.get(), 1);
    assert_eq!(host.notices.borrow().as_slice(), ["Audio: es"]);
    assert_eq!(host.checks.borrow().as_slice(), [("setting", "hls-audio".to_string(), 1)]);
}

#[test]
fn test_hls_custom_label() {
    let host = Rc::new(RecordingHost::default());
    let video = Rc::new(FakeVideo::default());
    let mut options = HlsOptions::default();
    options.quality.control = true;
    options.quality_label = Some(Rc::new(|level: &QualityLevel, _: usize| {
        format!("{}p HD", level.height.unwrap_or(0))
    }));
    let adapter = HlsAdapter::new(Rc::clone(&host), video, options);
    let runtime = FakeHlsRuntime::new(vec![QualityLevel::with_height(720)], vec![]);
    adapter.init(&runtime, MANIFEST).unwrap();

    adapter.update().unwrap();
    assert_eq!(host.controls.borrow()[0].selector[0].label, "720p HD");
}

#[test]
fn test_hls_empty_custom_label_falls_back() {
    let host = Rc::new(RecordingHost::default());
    let video = Rc::new(FakeVideo::default());
    let mut options = HlsOptions::default();
    options.quality.control = true;
    options.audio.control = true;
    options.quality_label = Some(Rc::new(|level: &QualityLevel, _: usize| match level.height {
        Some(1080) => "Full HD".to_string(),
        _ => String::new(),
    }));
    options.audio_label = Some(Rc::new(|_: &AudioTrack, _: usize| String::new()));
    let adapter = HlsAdapter::new(Rc::clone(&host), video, options);
    let runtime = FakeHlsRuntime::new(ladder(), tracks());
    adapter.init(&runtime, MANIFEST).unwrap();

    adapter.update().unwrap();

    let controls = host.controls.borrow();
    let labels: Vec<_> = controls[0].selector.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Full HD", "720P", "360P", "Auto"]);
    let labels: Vec<_> = controls[1].selector.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["English", "es"]);
}

#[test]
fn test_hls_rejected_selection() {
    let (adapter, host, _) = hls_adapter((true, false), (true, false));
    let runtime = FakeHlsRuntime::new(ladder(), tracks());
    adapter.init(&runtime, MANIFEST).unwrap();
    runtime.instance.reject_selection.set(true);

    let label = adapter.select(SelectorKind::Quality, &SelectorItem::new("1080P", 3, false));
    adapter.select(SelectorKind::Audio, &SelectorItem::new("es", 1, false));

    assert_eq!(label, "1080P");
    assert_eq!(runtime.instance.current_level.get(), -1);
    assert_eq!(runtime.instance.audio_track.get(), 0);
    assert_eq!(host.notices.borrow().as_slice(), ["Quality: 1080P", "Audio: es"]);

    // the instance is still releasable afterwards
    adapter.destroy();
    assert_eq!(runtime.instance.destroyed.get(), 1);
    assert!(!adapter.is_attached());
}

#[test]
fn test_hls_native_fallback() {
    let host = Rc::new(RecordingHost::default());
    let video = Rc::new(FakeVideo { native_hls: true, ..Default::default() });
    let adapter: TestHls = HlsAdapter::new(Rc::clone(&host), Rc::clone(&video), HlsOptions::default());
    let mut runtime = FakeHlsRuntime::new(ladder(), vec![]);
    runtime.supported = false;

    assert_eq!(adapter.init(&runtime, MANIFEST).unwrap(), HlsInit::Native);
    assert_eq!(video.src.borrow().as_deref(), Some(MANIFEST));
    assert!(!adapter.is_attached());
    assert!(host.notices.borrow().is_empty());
}

#[test]
fn test_hls_unsupported() {
    let (adapter, host, video) = hls_adapter((true, true), (true, true));
    let mut runtime = FakeHlsRuntime::new(ladder(), vec![]);
    runtime.supported = false;

    assert_eq!(adapter.init(&runtime, MANIFEST).unwrap(), HlsInit::Unsupported);
    assert!(video.src.borrow().is_none());
    assert_eq!(host.notices.borrow().as_slice(), ["Unsupported playback format: m3u8"]);
}

#[test]
fn test_hls_reinit_and_destroy() {
    let (adapter, _, _) = hls_adapter((true, true), (false, false));
    let runtime = FakeHlsRuntime::new(ladder(), vec![]);

    adapter.init(&runtime, MANIFEST).unwrap();
    adapter.init(&runtime, MANIFEST).unwrap();
    assert_eq!(runtime.instance.destroyed.get(), 1);

    adapter.destroy();
    adapter.destroy();
    assert_eq!(runtime.instance.destroyed.get(), 2);
    assert!(!adapter.is_attached());
}

#[test]
fn test_hls_script_failure_notice() {
    let (adapter, host, _) = hls_adapter((true, true), (false, false));
    adapter.script_failed();
    assert_eq!(host.notices.borrow().as_slice(), ["Failed to load HLS.js library"]);
}

#[test]
fn test_hls_adapter_surface() {
    let (adapter, _, _) = hls_adapter((true, true), (false, false));
    assert_eq!(adapter.name(), "hls-plugin");
    assert_eq!(
        adapter.capabilities(),
        Capabilities { update: true, destroy: true, ..Default::default() }
    );
}

// =============================================================================
// YouTube fakes
// =============================================================================

#[derive(Default)]
struct YtState {
    time: Cell<f64>,
    duration: f64,
    volume: Cell<f64>,
    muted: Cell<bool>,
    rate: Cell<f64>,
    calls: RefCell<Vec<String>>,
    destroyed: Cell<bool>,
    failing: bool,
}

#[derive(Clone)]
struct FakeEmbed(Rc<YtState>);

impl FakeEmbed {
    fn new() -> Self {
        let state = YtState { duration: 212.0, ..Default::default() };
        state.volume.set(100.0);
        state.rate.set(1.0);
        FakeEmbed(Rc::new(state))
    }

    fn failing() -> Self {
        FakeEmbed(Rc::new(YtState { failing: true, ..Default::default() }))
    }

    fn calls(&self) -> Vec<String> {
        self.0.calls.borrow().clone()
    }

    fn record(&self, method: &'static str) -> Result<()> {
        if self.0.failing {
            return Err(Error::embed(method, "player gone"));
        }
        self.0.calls.borrow_mut().push(method.to_string());
        Ok(())
    }
}

impl YoutubeEmbed for FakeEmbed {
    fn play_video(&self) -> Result<()> {
        self.record("playVideo")
    }

    fn pause_video(&self) -> Result<()> {
        self.record("pauseVideo")
    }

    fn stop_video(&self) -> Result<()> {
        self.record("stopVideo")
    }

    fn seek_to(&self, seconds: f64, _allow_seek_ahead: bool) -> Result<()> {
        self.record("seekTo")?;
        self.0.time.set(seconds);
        Ok(())
    }

    fn current_time(&self) -> Result<f64> {
        self.record("getCurrentTime")?;
        Ok(self.0.time.get())
    }

    fn duration(&self) -> Result<f64> {
        self.record("getDuration")?;
        Ok(self.0.duration)
    }

    fn volume(&self) -> Result<f64> {
        self.record("getVolume")?;
        Ok(self.0.volume.get())
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.record("setVolume")?;
        self.0.volume.set(f64::from(volume));
        Ok(())
    }

    fn is_muted(&self) -> Result<bool> {
        self.record("isMuted")?;
        Ok(self.0.muted.get())
    }

    fn mute(&self) -> Result<()> {
        self.record("mute")?;
        self.0.muted.set(true);
        Ok(())
    }

    fn unmute(&self) -> Result<()> {
        self.record("unMute")?;
        self.0.muted.set(false);
        Ok(())
    }

    fn playback_rate(&self) -> Result<f64> {
        self.record("getPlaybackRate")?;
        Ok(self.0.rate.get())
    }

    fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.record("setPlaybackRate")?;
        self.0.rate.set(rate);
        Ok(())
    }

    fn destroy(&self) -> Result<()> {
        self.0.destroyed.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FakeTimer {
    period: Rc<Cell<Option<Duration>>>,
    starts: Rc<Cell<u32>>,
}

impl IntervalTimer for FakeTimer {
    fn start(&self, period: Duration) {
        self.period.set(Some(period));
        self.starts.set(self.starts.get() + 1);
    }

    fn stop(&self) {
        self.period.set(None);
    }

    fn is_active(&self) -> bool {
        self.period.get().is_some()
    }
}

#[derive(Clone, Default)]
struct FakeContainer(Rc<Cell<bool>>);

impl EmbedContainer for FakeContainer {
    fn detach(&self) {
        self.0.set(true);
    }
}

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s";

type TestYoutube = YoutubeAdapter<Rc<RecordingHost>, Rc<FakeVideo>, FakeEmbed, FakeTimer>;

struct YoutubeFixture {
    adapter: TestYoutube,
    host: Rc<RecordingHost>,
    video: Rc<FakeVideo>,
    timer: FakeTimer,
    container: FakeContainer,
    embed: FakeEmbed,
}

fn youtube_fixture(autoplay: bool) -> YoutubeFixture {
    let host = Rc::new(RecordingHost::default());
    let video = Rc::new(FakeVideo::default());
    let timer = FakeTimer::default();
    let adapter = YoutubeAdapter::new(
        Rc::clone(&host),
        Rc::clone(&video),
        timer.clone(),
        YoutubeConfig::default(),
        autoplay,
    );
    YoutubeFixture {
        adapter,
        host,
        video,
        timer,
        container: FakeContainer::default(),
        embed: FakeEmbed::new(),
    }
}

// Runs the adapter through prepare, mount, attach and ready
fn ready_fixture(autoplay: bool) -> YoutubeFixture {
    let fx = youtube_fixture(autoplay);
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.mount_container(Box::new(fx.container.clone()));
    assert!(fx.adapter.attach_embed(fx.embed.clone()));
    fx.adapter.on_ready();
    fx
}

// =============================================================================
// YouTube Tests
// =============================================================================

#[test]
fn test_youtube_invalid_url() {
    let fx = youtube_fixture(false);

    assert!(fx.adapter.prepare("not a url").is_none());
    assert_eq!(fx.host.notices.borrow().as_slice(), ["Invalid YouTube URL"]);
    assert!(fx.adapter.embed_options().is_none());
    assert!(fx.adapter.video_id().is_none());
}

#[test]
fn test_youtube_prepare() {
    let fx = youtube_fixture(true);
    let spec = fx.adapter.prepare(WATCH_URL).unwrap();

    assert_eq!(spec.id, "art-youtube-dQw4w9WgXcQ");
    let options = fx.adapter.embed_options().unwrap();
    assert_eq!(options.video_id.as_str(), "dQw4w9WgXcQ");
    assert_eq!(options.player_vars.autoplay, 1);
}

#[test]
fn test_youtube_ready_sequence() {
    let fx = ready_fixture(false);

    assert!(fx.adapter.is_ready());
    assert!(fx.video.hidden.get());
    assert!(fx.video.proxy().is_some());
    assert_eq!(fx.timer.period.get(), Some(Duration::from_millis(250)));
    assert_eq!(fx.host.loading.borrow().as_slice(), [false]);
    assert_eq!(fx.host.event_names(), vec!["video:loadedmetadata", "video:canplay"]);
    assert!(!fx.embed.calls().contains(&"playVideo".to_string()));

    // second ready signal is ignored
    fx.adapter.on_ready();
    assert_eq!(fx.timer.starts.get(), 1);
    assert_eq!(fx.host.events.borrow().len(), 2);
}

#[test]
fn test_youtube_autoplay() {
    let fx = ready_fixture(true);
    assert_eq!(fx.embed.calls(), vec!["playVideo"]);
}

#[test]
fn test_youtube_ready_without_embed_is_ignored() {
    let fx = youtube_fixture(false);
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.on_ready();

    assert!(!fx.adapter.is_ready());
    assert!(fx.video.proxy().is_none());
    assert!(!fx.timer.is_active());
}

#[test]
fn test_youtube_proxy_defaults_before_ready() {
    let fx = youtube_fixture(false);
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.attach_embed(fx.embed.clone());
    let proxy = fx.adapter.proxy();

    assert_eq!(proxy.current_time(), 0.0);
    assert_eq!(proxy.duration(), 0.0);
    assert_eq!(proxy.volume(), 1.0);
    assert!(!proxy.muted());
    assert_eq!(proxy.playback_rate(), 1.0);
    proxy.set_current_time(30.0);
    proxy.play();
    assert!(fx.embed.calls().is_empty());
}

#[test]
fn test_youtube_proxy_forwards() {
    let fx = ready_fixture(false);
    let proxy = fx.video.proxy().unwrap();

    proxy.set_current_time(42.5);
    assert_eq!(proxy.current_time(), 42.5);
    assert_eq!(proxy.duration(), 212.0);

    proxy.set_current_time(f64::NAN);
    assert_eq!(fx.embed.0.time.get(), 0.0);

    proxy.set_playback_rate(1.5);
    assert_eq!(proxy.playback_rate(), 1.5);
    proxy.set_playback_rate(0.0);
    assert_eq!(proxy.playback_rate(), 1.0);

    proxy.set_muted(true);
    assert!(proxy.muted());
    proxy.set_muted(false);
    assert!(!proxy.muted());

    proxy.pause();
    assert!(fx.embed.calls().contains(&"pauseVideo".to_string()));
}

#[test]
fn test_youtube_volume_round_trip() {
    let fx = ready_fixture(false);
    let proxy = fx.video.proxy().unwrap();

    for v in [0.0, 0.126, 0.5, 0.874, 1.0] {
        proxy.set_volume(v);
        let expected = (v * 100.0).round() / 100.0;
        assert!((proxy.volume() - expected).abs() < 1e-9, "{v}");
    }

    proxy.set_volume(3.0);
    assert_eq!(proxy.volume(), 1.0);
    proxy.set_volume(-1.0);
    assert_eq!(proxy.volume(), 0.0);
}

#[test]
fn test_youtube_embed_errors_are_suppressed() {
    let fx = youtube_fixture(false);
    let embed = FakeEmbed::failing();
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.attach_embed(embed.clone());
    fx.adapter.on_ready();
    let proxy = fx.adapter.proxy();

    proxy.set_volume(0.5);
    proxy.play();
    assert_eq!(proxy.current_time(), 0.0);
    assert_eq!(proxy.volume(), 1.0);
    assert!(!proxy.muted());
    assert_eq!(proxy.playback_rate(), 1.0);
    fx.adapter.stop();
}

#[test]
fn test_youtube_tick() {
    let fx = youtube_fixture(false);
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.attach_embed(fx.embed.clone());

    fx.adapter.on_tick();
    assert!(fx.host.events.borrow().is_empty());

    fx.adapter.on_ready();
    fx.host.events.borrow_mut().clear();
    fx.adapter.on_tick();
    fx.adapter.on_tick();
    assert_eq!(
        fx.host.event_names(),
        vec!["video:timeupdate", "video:progress", "video:timeupdate", "video:progress"]
    );
}

#[test]
fn test_youtube_state_changes() {
    let fx = ready_fixture(false);
    fx.host.events.borrow_mut().clear();

    fx.adapter.on_state_change(1);
    fx.adapter.on_state_change(2);
    fx.adapter.on_state_change(3);
    fx.adapter.on_state_change(0);
    fx.adapter.on_state_change(5);
    fx.adapter.on_playback_rate_change(2.0);

    let events = fx.host.events.borrow();
    let names: Vec<_> = events.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "video:play",
            "video:playing",
            "video:pause",
            "video:waiting",
            "video:ended",
            "video:statechange",
            "video:ratechange",
        ]
    );
    assert_eq!(events[5].1, Some(5.0));
    assert_eq!(events[6].1, Some(2.0));
}

#[test]
fn test_youtube_destroy() {
    let fx = ready_fixture(false);

    fx.adapter.destroy();

    assert!(!fx.adapter.is_ready());
    assert!(!fx.timer.is_active());
    assert!(fx.embed.0.destroyed.get());
    assert!(fx.container.0.get());
    assert!(fx.video.proxy().is_none());
    assert!(!fx.video.hidden.get());
    assert!(fx.adapter.embed_options().is_none());

    // idempotent
    fx.adapter.destroy();
    assert_eq!(fx.video.proxy_removals.get(), 1);
    assert!(!fx.timer.is_active());
}

#[test]
fn test_youtube_destroy_before_init() {
    let fx = youtube_fixture(false);
    fx.adapter.destroy();
    fx.adapter.destroy();

    assert!(!fx.timer.is_active());
    assert_eq!(fx.video.proxy_removals.get(), 0);
    assert!(!fx.video.hidden.get());
}

#[test]
fn test_youtube_late_callbacks_after_destroy() {
    let fx = youtube_fixture(false);
    fx.adapter.prepare(WATCH_URL).unwrap();
    fx.adapter.mount_container(Box::new(fx.container.clone()));
    fx.adapter.destroy();
    assert!(fx.container.0.get());

    // script finished loading after teardown
    assert!(fx.adapter.embed_options().is_none());
    let late = FakeEmbed::new();
    assert!(!fx.adapter.attach_embed(late.clone()));
    assert!(late.0.destroyed.get());

    fx.adapter.on_ready();
    fx.adapter.on_tick();
    fx.adapter.on_state_change(1);
    fx.adapter.on_playback_rate_change(1.25);
    assert!(fx.host.events.borrow().is_empty());
    assert!(!fx.timer.is_active());
}

#[test]
fn test_youtube_stop_start_mute() {
    let fx = youtube_fixture(false);
    fx.adapter.prepare(WATCH_URL).unwrap();

    // not ready: native element
    fx.adapter.stop();
    fx.adapter.start();
    fx.adapter.mute();
    assert_eq!(fx.video.native_pauses.get(), 1);
    assert_eq!(fx.video.native_plays.get(), 1);
    assert!(fx.video.native_muted.get());

    fx.adapter.attach_embed(fx.embed.clone());
    fx.adapter.on_ready();
    fx.adapter.stop();
    fx.adapter.start();
    fx.adapter.mute();
    assert_eq!(fx.embed.calls(), vec!["stopVideo", "playVideo", "mute"]);
    assert!(fx.embed.0.muted.get());
}

#[test]
fn test_youtube_adapter_surface() {
    let fx = youtube_fixture(false);
    let adapter: &dyn SourceAdapter = &fx.adapter;

    assert_eq!(adapter.name(), "youtube-plugin");
    let caps = adapter.capabilities();
    assert!(caps.destroy && caps.start && caps.stop && caps.mute);
    assert!(!caps.update);
    assert!(adapter.update().is_ok());
}
