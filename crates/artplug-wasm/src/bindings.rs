//! Imported JavaScript surfaces: Artplayer, hls.js and the YouTube player

use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

#[wasm_bindgen]
extern "C" {
    /// An Artplayer instance as handed to plugins
    #[derive(Clone, Debug)]
    pub type Artplayer;

    #[wasm_bindgen(method, getter)]
    pub fn option(this: &Artplayer) -> JsValue;

    #[wasm_bindgen(method, getter)]
    pub fn template(this: &Artplayer) -> JsValue;

    #[wasm_bindgen(method, getter)]
    pub fn notice(this: &Artplayer) -> JsValue;

    #[wasm_bindgen(method, getter)]
    pub fn loading(this: &Artplayer) -> JsValue;

    #[wasm_bindgen(method, getter)]
    pub fn controls(this: &Artplayer) -> Panel;

    #[wasm_bindgen(method, getter)]
    pub fn setting(this: &Artplayer) -> Panel;

    #[wasm_bindgen(method, getter)]
    pub fn icons(this: &Artplayer) -> JsValue;

    #[wasm_bindgen(method)]
    pub fn on(this: &Artplayer, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn emit(this: &Artplayer, event: &str, payload: &JsValue);

    /// `art.controls` / `art.setting`
    pub type Panel;

    #[wasm_bindgen(method, catch)]
    pub fn update(this: &Panel, descriptor: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn check(this: &Panel, item: &JsValue) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    /// `window.Hls`
    #[derive(Clone, Debug)]
    pub type Hls;

    #[wasm_bindgen(constructor, catch)]
    pub fn new() -> Result<Hls, JsValue>;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported)]
    pub fn is_supported() -> bool;

    #[wasm_bindgen(method, getter)]
    pub fn levels(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, getter = audioTracks)]
    pub fn audio_tracks(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, getter = currentLevel)]
    pub fn current_level(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, catch, setter = currentLevel)]
    pub fn set_current_level(this: &Hls, level: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter = audioTrack)]
    pub fn audio_track(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, catch, setter = audioTrack)]
    pub fn set_audio_track(this: &Hls, id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, getter)]
    pub fn media(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = loadSource)]
    pub fn load_source(this: &Hls, url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = attachMedia)]
    pub fn attach_media(this: &Hls, media: &HtmlMediaElement) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    pub fn on(this: &Hls, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Hls);
}

#[wasm_bindgen]
extern "C" {
    /// `YT.Player`
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    #[derive(Clone, Debug)]
    pub type YtPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player", catch)]
    pub fn new(target: &web_sys::HtmlElement, options: &JsValue) -> Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = playVideo)]
    pub fn play_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = pauseVideo)]
    pub fn pause_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = stopVideo)]
    pub fn stop_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = seekTo)]
    pub fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = getCurrentTime)]
    pub fn get_current_time(this: &YtPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = getDuration)]
    pub fn get_duration(this: &YtPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = getVolume)]
    pub fn get_volume(this: &YtPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = setVolume)]
    pub fn set_volume(this: &YtPlayer, volume: u8) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = isMuted)]
    pub fn is_muted(this: &YtPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player")]
    pub fn mute(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = unMute)]
    pub fn unmute(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = getPlaybackRate)]
    pub fn get_playback_rate(this: &YtPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player", js_name = setPlaybackRate)]
    pub fn set_playback_rate(this: &YtPlayer, rate: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Player")]
    pub fn destroy(this: &YtPlayer) -> Result<(), JsValue>;
}
