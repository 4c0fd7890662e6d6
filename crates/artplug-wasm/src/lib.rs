//! Artplug WASM - Artplayer source plugins for the browser
//!
//! Binds the adapters in `artplug-core` to the live page:
//! - `hlsPlugin`: hls.js playback with quality / audio-track selectors
//! - `youtubePlugin`: YouTube iframe embed driven through the video element
//! - `isYoutube` / `parseVideoId`: video-id resolution
//!
//! ## Integration with Artplayer
//!
//! ```javascript
//! import init, { hlsPlugin, youtubePlugin, isYoutube } from '@artplug/wasm';
//!
//! await init();
//! const url = 'https://youtu.be/dQw4w9WgXcQ';
//! const art = new Artplayer({
//!     container: '.artplayer-app',
//!     url,
//!     plugins: [isYoutube(url) ? youtubePlugin : hlsPlugin],
//! });
//! ```

use tracing::Level;
use wasm_bindgen::prelude::*;

mod bindings;
mod dom;
mod hls;
mod host;
mod logging;
mod youtube;

pub use hls::hls_plugin;
pub use youtube::youtube_plugin;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    logging::init(level);
    artplug_core::init();
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    artplug_core::VERSION.to_string()
}

/// Whether `input` is a YouTube URL or a bare video id
#[wasm_bindgen(js_name = isYoutube)]
pub fn is_youtube(input: &str) -> bool {
    artplug_core::is_youtube(input)
}

/// The 11-character video id in `input`, or `undefined`
#[wasm_bindgen(js_name = parseVideoId)]
pub fn parse_video_id(input: &str) -> Option<String> {
    artplug_core::parse_video_id(input).map(|id| id.as_str().to_string())
}
