//! Media element capability
//!
//! `MediaControllable` is the surface Artplayer expects from its video
//! element. Adapters implement it for external players and the bindings
//! install the implementation on the element.

/// Playback control surface of a media element
pub trait MediaControllable {
    /// Position in seconds
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);

    /// Length in seconds, 0 when unknown
    fn duration(&self) -> f64;

    /// Volume in `[0, 1]`
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);

    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&self, rate: f64);

    fn play(&self);
    fn pause(&self);
}

/// Property names overridden on the host element
pub const PROXIED_PROPERTIES: [&str; 5] = ["currentTime", "duration", "volume", "muted", "playbackRate"];

/// Method names overridden on the host element
pub const PROXIED_METHODS: [&str; 2] = ["play", "pause"];

/// Host volume (0-1) to embed volume (0-100), clamped and rounded
///
/// Returns `None` for non-numeric input, which callers ignore.
pub fn host_volume_to_embed(volume: f64) -> Option<u8> {
    if volume.is_nan() {
        return None;
    }
    Some((volume.clamp(0.0, 1.0) * 100.0).round() as u8)
}

/// Embed volume (0-100) to host volume (0-1); full volume when unknown
pub fn embed_volume_to_host(volume: f64) -> f64 {
    if volume.is_finite() {
        (volume / 100.0).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// `value` when finite, else `fallback`
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
