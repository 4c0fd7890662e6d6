//! Shared types: playback sources, host events and embed states

use crate::youtube_id::{is_video_id, parse_video_id};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical 11-character YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Wrap a token, rejecting anything outside `[A-Za-z0-9_-]{11}`
    pub fn new(token: &str) -> Option<Self> {
        is_video_id(token).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Privacy-enhanced embed URL
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube-nocookie.com/embed/{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::new(&value).ok_or_else(|| format!("not a YouTube video id: {value}"))
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// A source the plugins know how to play
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlaybackSource {
    Hls { url: String },
    Youtube { video_id: VideoId },
}

impl PlaybackSource {
    /// Classify a raw source string; `None` means no adapter applies
    pub fn detect(input: &str) -> Option<Self> {
        if crate::hls::is_hls_url(input) {
            return Some(PlaybackSource::Hls {
                url: input.to_string(),
            });
        }
        parse_video_id(input).map(|video_id| PlaybackSource::Youtube { video_id })
    }

    /// Name of the plugin that handles this source
    pub fn plugin_name(&self) -> &'static str {
        match self {
            PlaybackSource::Hls { .. } => crate::hls::PLUGIN_NAME,
            PlaybackSource::Youtube { .. } => crate::youtube::PLUGIN_NAME,
        }
    }
}

/// Media events emitted on the host bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    LoadedMetadata,
    CanPlay,
    Play,
    Playing,
    Pause,
    Ended,
    Waiting,
    TimeUpdate,
    Progress,
    RateChange,
    StateChange,
}

impl HostEvent {
    /// DOM event type carried in the payload
    pub fn dom_type(&self) -> &'static str {
        match self {
            HostEvent::LoadedMetadata => "loadedmetadata",
            HostEvent::CanPlay => "canplay",
            HostEvent::Play => "play",
            HostEvent::Playing => "playing",
            HostEvent::Pause => "pause",
            HostEvent::Ended => "ended",
            HostEvent::Waiting => "waiting",
            HostEvent::TimeUpdate => "timeupdate",
            HostEvent::Progress => "progress",
            HostEvent::RateChange => "ratechange",
            HostEvent::StateChange => "statechange",
        }
    }

    /// Bus name, e.g. `video:timeupdate`
    pub fn name(&self) -> String {
        format!("video:{}", self.dom_type())
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video:{}", self.dom_type())
    }
}

/// Payload passed with a host event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<f64>,
}

impl EventPayload {
    pub fn new(event: HostEvent, data: Option<f64>) -> Self {
        Self {
            kind: event.dom_type(),
            data,
        }
    }
}

/// `YT.PlayerState` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl EmbedState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(EmbedState::Unstarted),
            0 => Some(EmbedState::Ended),
            1 => Some(EmbedState::Playing),
            2 => Some(EmbedState::Paused),
            3 => Some(EmbedState::Buffering),
            5 => Some(EmbedState::Cued),
            _ => None,
        }
    }
}

/// Host events for an embed state code, in emission order
pub fn state_events(code: i32) -> Vec<(HostEvent, Option<f64>)> {
    match EmbedState::from_code(code) {
        Some(EmbedState::Playing) => vec![(HostEvent::Play, None), (HostEvent::Playing, None)],
        Some(EmbedState::Paused) => vec![(HostEvent::Pause, None)],
        Some(EmbedState::Ended) => vec![(HostEvent::Ended, None)],
        Some(EmbedState::Buffering) => vec![(HostEvent::Waiting, None)],
        _ => vec![(HostEvent::StateChange, Some(f64::from(code)))],
    }
}
