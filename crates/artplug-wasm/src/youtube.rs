//! `youtubePlugin`: a YouTube iframe embed behind the host's video element

use std::rc::{Rc, Weak};

use artplug_core::{
    ensure_script, Error, HostPlayer, Result, ScriptStatus, YoutubeAdapter, YoutubeConfig, YoutubeEmbed,
};
use js_sys::{Function, Object};
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlVideoElement};

use crate::bindings::{Artplayer, YtPlayer};
use crate::dom::{describe, get, set, BrowserInterval, DomContainer, NativeVideo, PageScripts};
use crate::host::{listen, plugin_options, plugin_surface, to_js, ArtHost};

type WebYoutubeAdapter = YoutubeAdapter<Rc<ArtHost>, NativeVideo, WebEmbed, BrowserInterval>;

/// A `YT.Player` behind [`YoutubeEmbed`]
pub struct WebEmbed(YtPlayer);

fn embed_err(method: &'static str) -> impl Fn(JsValue) -> Error {
    move |err| Error::embed(method, describe(&err))
}

fn number(value: JsValue) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

impl YoutubeEmbed for WebEmbed {
    fn play_video(&self) -> Result<()> {
        self.0.play_video().map_err(embed_err("playVideo"))
    }

    fn pause_video(&self) -> Result<()> {
        self.0.pause_video().map_err(embed_err("pauseVideo"))
    }

    fn stop_video(&self) -> Result<()> {
        self.0.stop_video().map_err(embed_err("stopVideo"))
    }

    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()> {
        self.0.seek_to(seconds, allow_seek_ahead).map_err(embed_err("seekTo"))
    }

    fn current_time(&self) -> Result<f64> {
        self.0.get_current_time().map(number).map_err(embed_err("getCurrentTime"))
    }

    fn duration(&self) -> Result<f64> {
        self.0.get_duration().map(number).map_err(embed_err("getDuration"))
    }

    fn volume(&self) -> Result<f64> {
        self.0.get_volume().map(number).map_err(embed_err("getVolume"))
    }

    fn set_volume(&self, volume: u8) -> Result<()> {
        self.0.set_volume(volume).map_err(embed_err("setVolume"))
    }

    fn is_muted(&self) -> Result<bool> {
        self.0.is_muted().map(|v| v.is_truthy()).map_err(embed_err("isMuted"))
    }

    fn mute(&self) -> Result<()> {
        self.0.mute().map_err(embed_err("mute"))
    }

    fn unmute(&self) -> Result<()> {
        self.0.unmute().map_err(embed_err("unMute"))
    }

    fn playback_rate(&self) -> Result<f64> {
        self.0.get_playback_rate().map(number).map_err(embed_err("getPlaybackRate"))
    }

    fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.0.set_playback_rate(rate).map_err(embed_err("setPlaybackRate"))
    }

    fn destroy(&self) -> Result<()> {
        self.0.destroy().map_err(embed_err("destroy"))
    }
}

fn callback(weak: &Weak<WebYoutubeAdapter>, f: fn(&WebYoutubeAdapter, JsValue)) -> JsValue {
    let weak = Weak::clone(weak);
    Closure::wrap(Box::new(move |event: JsValue| {
        if let Some(adapter) = weak.upgrade() {
            f(&adapter, event);
        }
    }) as Box<dyn FnMut(JsValue)>)
    .into_js_value()
}

fn embed_events(adapter: &Rc<WebYoutubeAdapter>) -> std::result::Result<Object, JsValue> {
    let weak = Rc::downgrade(adapter);
    let events = Object::new();
    set(&events, "onReady", &callback(&weak, |a, _| a.on_ready()))?;
    set(
        &events,
        "onStateChange",
        &callback(&weak, |a, event| {
            if let Some(code) = get(&event, "data").as_f64() {
                a.on_state_change(code as i32);
            }
        }),
    )?;
    set(
        &events,
        "onPlaybackRateChange",
        &callback(&weak, |a, event| {
            if let Some(rate) = get(&event, "data").as_f64() {
                a.on_playback_rate_change(rate);
            }
        }),
    )?;
    Ok(events)
}

// `new YT.Player(target, options)` once the iframe API is up
fn create_embed(adapter: &Rc<WebYoutubeAdapter>, target: &HtmlElement) -> std::result::Result<(), JsValue> {
    let Some(options) = adapter.embed_options() else {
        debug!("Iframe API ready after teardown");
        return Ok(());
    };
    let options = to_js(&options)?;
    set(&options, "events", &embed_events(adapter)?.into())?;

    let player = YtPlayer::new(target, &options)?;
    adapter.attach_embed(WebEmbed(player));
    Ok(())
}

// Run `on_ready` once `YT.Player` exists, chaining any existing hook
fn load_api(src: &str, on_ready: impl FnOnce() + 'static) -> Result<()> {
    let status = ensure_script(&PageScripts::youtube(), src)?;
    if status == ScriptStatus::Available {
        on_ready();
        return Ok(());
    }
    debug!(?status, src, "Waiting for the YouTube iframe API");

    let window = web_sys::window().ok_or_else(|| Error::Host("window is not available".to_string()))?;
    let previous = get(&window, "onYouTubeIframeAPIReady");
    let hook = Closure::once_into_js(move || {
        if let Some(previous) = previous.dyn_ref::<Function>() {
            if let Err(err) = previous.call0(&JsValue::NULL) {
                debug!(cause = %describe(&err), "Previous iframe API hook threw");
            }
        }
        on_ready();
    });
    set(&window, "onYouTubeIframeAPIReady", &hook).map_err(|err| Error::Host(describe(&err)))
}

/// Artplayer plugin factory for YouTube sources
///
/// ```javascript
/// new Artplayer({
///     url: 'https://youtu.be/dQw4w9WgXcQ',
///     plugins: [youtubePlugin],
/// });
/// ```
#[wasm_bindgen(js_name = youtubePlugin)]
pub fn youtube_plugin(art: Artplayer) -> std::result::Result<JsValue, JsValue> {
    let options = plugin_options(&art);
    let config = YoutubeConfig::from_plugin_options(&options);
    let template = art.template();
    let element: HtmlVideoElement = get(&template, "$video").dyn_into()?;
    let host = Rc::new(ArtHost::new(art.clone()));

    let adapter = Rc::new_cyclic(|weak: &Weak<WebYoutubeAdapter>| {
        let weak = Weak::clone(weak);
        let timer = BrowserInterval::new(move || {
            if let Some(adapter) = weak.upgrade() {
                adapter.on_tick();
            }
        });
        YoutubeAdapter::new(
            Rc::clone(&host),
            NativeVideo::new(element),
            timer,
            config.clone(),
            options.autoplay,
        )
    });

    if let Some(spec) = adapter.prepare(&options.url) {
        let root: HtmlElement = get(&template, "$player").dyn_into()?;
        let container = DomContainer::mount(&root, &spec)?;
        let target = container.target().clone();
        adapter.mount_container(Box::new(container));
        info!(container = %spec.id, "YouTube container mounted");

        let weak = Rc::downgrade(&adapter);
        let on_ready = move || {
            let Some(adapter) = weak.upgrade() else {
                return;
            };
            if let Err(err) = create_embed(&adapter, &target) {
                error!(cause = %describe(&err), "Could not create the YouTube player");
                adapter.destroy();
            }
        };
        if let Err(err) = load_api(&config.api_src, on_ready) {
            error!(code = err.error_code(), "{err}");
            host.show_notice(&err.to_string());
        }
    }

    for event in ["destroy", "restart"] {
        let weak = Rc::downgrade(&adapter);
        listen(&art, event, move || {
            if let Some(adapter) = weak.upgrade() {
                adapter.destroy();
            }
        });
    }

    plugin_surface(adapter, host)
}
