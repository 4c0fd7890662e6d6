//! `hlsPlugin`: hls.js playback with quality and audio selectors

use std::rc::{Rc, Weak};

use artplug_core::hls::{is_hls_url, HlsAdapter, HlsBackend, HlsInit, HlsOptions, HlsRuntime};
use artplug_core::{
    ensure_script, AudioTrack, Error, HostPlayer, QualityLevel, Result, ScriptStatus, SelectorItem, SelectorKind,
};
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

use crate::bindings::{Artplayer, Hls};
use crate::dom::{describe, get, script_tag, set, NativeVideo, PageScripts};
use crate::host::{label_fn, listen, plugin_options, plugin_surface, ArtHost, SelectHandler};

type WebHlsAdapter = HlsAdapter<Rc<ArtHost>, NativeVideo, WebHls>;

/// hls.js events after which the selectors are rebuilt
const REFRESH_EVENTS: [&str; 2] = ["hlsManifestParsed", "hlsAudioTracksUpdated"];

/// A live `Hls` instance bound to the host's video element
pub struct WebHls {
    hls: Hls,
    video: HtmlVideoElement,
}

fn index_or(value: JsValue, fallback: i32) -> i32 {
    value.as_f64().map(|v| v as i32).unwrap_or(fallback)
}

impl HlsBackend for WebHls {
    fn levels(&self) -> Vec<QualityLevel> {
        serde_wasm_bindgen::from_value(self.hls.levels()).unwrap_or_else(|err| {
            debug!(%err, "Unreadable hls.levels");
            Vec::new()
        })
    }

    fn audio_tracks(&self) -> Vec<AudioTrack> {
        serde_wasm_bindgen::from_value(self.hls.audio_tracks()).unwrap_or_else(|err| {
            debug!(%err, "Unreadable hls.audioTracks");
            Vec::new()
        })
    }

    fn current_level(&self) -> i32 {
        index_or(self.hls.current_level(), artplug_core::selector::AUTO_LEVEL)
    }

    fn set_current_level(&self, level: i32) -> Result<()> {
        self.hls
            .set_current_level(level)
            .map_err(|err| Error::Host(format!("currentLevel: {}", describe(&err))))
    }

    fn audio_track(&self) -> i32 {
        index_or(self.hls.audio_track(), -1)
    }

    fn set_audio_track(&self, id: i32) -> Result<()> {
        self.hls
            .set_audio_track(id)
            .map_err(|err| Error::Host(format!("audioTrack: {}", describe(&err))))
    }

    fn load_source(&self, url: &str) -> Result<()> {
        self.hls
            .load_source(url)
            .map_err(|err| Error::Host(format!("loadSource: {}", describe(&err))))
    }

    fn attach_media(&self) -> Result<()> {
        self.hls
            .attach_media(&self.video)
            .map_err(|err| Error::Host(format!("attachMedia: {}", describe(&err))))
    }

    fn is_attached_to_host(&self) -> bool {
        js_sys::Object::is(&self.hls.media(), &self.video)
    }

    fn destroy(&self) {
        self.hls.destroy();
    }
}

/// `window.Hls`; new instances are published as `art.hls`
struct WindowHls {
    art: Artplayer,
    video: HtmlVideoElement,
}

impl HlsRuntime for WindowHls {
    type Backend = WebHls;

    fn is_supported(&self) -> bool {
        Hls::is_supported()
    }

    fn create(&self) -> Result<WebHls> {
        let hls = Hls::new().map_err(|err| Error::Host(format!("new Hls(): {}", describe(&err))))?;
        if let Err(err) = set(&self.art, "hls", &hls) {
            warn!(cause = %describe(&err), "Could not expose art.hls");
        }
        Ok(WebHls {
            hls,
            video: self.video.clone(),
        })
    }
}

// Rebuild selectors, reporting failures through the host
fn refresh(adapter: &WebHlsAdapter) -> std::result::Result<(), JsValue> {
    if !adapter.is_attached() {
        return Ok(());
    }
    adapter.update().map_err(|err| adapter.host().raise(&err))
}

fn start(adapter: &Rc<WebHlsAdapter>, runtime: &WindowHls, url: &str) {
    match adapter.init(runtime, url) {
        Ok(HlsInit::Attached) => {
            let weak = Rc::downgrade(adapter);
            adapter.with_backend(|backend| {
                for event in REFRESH_EVENTS {
                    let weak = Weak::clone(&weak);
                    let handler = Closure::wrap(Box::new(move || {
                        if let Some(adapter) = weak.upgrade() {
                            if let Err(err) = adapter.update() {
                                debug!(code = err.error_code(), "{err}");
                            }
                        }
                    }) as Box<dyn FnMut()>);
                    backend.hls.on(event, handler.as_ref().unchecked_ref());
                    handler.forget();
                }
            });
        }
        Ok(outcome) => debug!(?outcome, "HLS init finished without hls.js"),
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            adapter.host().show_notice(&err.to_string());
        }
    }
}

// Run `on_load` once hls.js has been fetched
fn load_library(src: &str, adapter: &Rc<WebHlsAdapter>, on_load: impl FnOnce() + 'static) {
    match ensure_script(&PageScripts::hls(), src) {
        Ok(ScriptStatus::Available) => on_load(),
        Ok(status) => {
            let Some(tag) = script_tag(src) else {
                adapter.script_failed();
                return;
            };
            debug!(?status, src, "Waiting for HLS.js");
            let failed = {
                let weak = Rc::downgrade(adapter);
                Closure::once_into_js(move || {
                    if let Some(adapter) = weak.upgrade() {
                        adapter.script_failed();
                    }
                })
            };
            let loaded = Closure::once_into_js(on_load);
            let listened = tag
                .add_event_listener_with_callback("load", loaded.unchecked_ref())
                .and_then(|_| tag.add_event_listener_with_callback("error", failed.unchecked_ref()));
            if let Err(err) = listened {
                warn!(cause = %describe(&err), "Could not watch the HLS.js script");
            }
        }
        Err(err) => {
            debug!(code = err.error_code(), "{err}");
            adapter.script_failed();
        }
    }
}

/// Artplayer plugin factory for HLS sources
///
/// ```javascript
/// new Artplayer({
///     url: 'https://example.com/master.m3u8',
///     plugins: [hlsPlugin],
///     quality: { control: true, setting: true },
/// });
/// ```
#[wasm_bindgen(js_name = hlsPlugin)]
pub fn hls_plugin(art: Artplayer) -> std::result::Result<JsValue, JsValue> {
    let options = plugin_options(&art);
    let raw_options = art.option();

    let mut hls_options = HlsOptions::from_plugin_options(&options);
    hls_options.quality_label = label_fn(get(&get(&raw_options, "quality"), "getName"));
    hls_options.audio_label = label_fn(get(&get(&raw_options, "audio"), "getName"));
    let script_src = hls_options.config.script_src.clone();

    let element: HtmlVideoElement = get(&art.template(), "$video").dyn_into()?;
    let video = NativeVideo::new(element.clone());

    let adapter = Rc::new_cyclic(|weak: &Weak<WebHlsAdapter>| {
        let weak = Weak::clone(weak);
        let on_select: SelectHandler = Rc::new(move |kind: SelectorKind, item: SelectorItem| match weak.upgrade() {
            Some(adapter) => adapter.select(kind, &item),
            None => item.label,
        });
        HlsAdapter::new(Rc::new(ArtHost::with_selection(art.clone(), on_select)), video, hls_options)
    });
    let host = Rc::clone(adapter.host());

    if is_hls_url(&options.url) {
        info!(url = %options.url, "HLS source detected");
        let runtime = WindowHls {
            art: art.clone(),
            video: element,
        };
        let on_load = {
            let weak = Rc::downgrade(&adapter);
            let url = options.url.clone();
            move || {
                if let Some(adapter) = weak.upgrade() {
                    start(&adapter, &runtime, &url);
                }
            }
        };
        load_library(&script_src, &adapter, on_load);

        for event in ["ready", "restart"] {
            let weak = Rc::downgrade(&adapter);
            listen(&art, event, move || {
                if let Some(adapter) = weak.upgrade() {
                    if let Err(err) = refresh(&adapter) {
                        error!(cause = %describe(&err), "Selector refresh failed");
                    }
                }
            });
        }
        let weak = Rc::downgrade(&adapter);
        listen(&art, "destroy", move || {
            if let Some(adapter) = weak.upgrade() {
                adapter.destroy();
            }
        });
    } else {
        debug!(url = %options.url, "Not an HLS source, plugin idle");
    }

    plugin_surface(adapter, host)
}
