//! Artplug Core - Source adapters for Artplayer
//!
//! This crate provides the platform-independent half of the Artplayer
//! source plugins:
//! - YouTube video-id resolution from URLs and bare ids
//! - HLS adapter: hls.js lifecycle plus quality / audio-track selectors
//! - YouTube adapter: iframe embed bridged onto the host media element
//! - Readiness gating and the `MediaControllable` capability
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Artplug Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │  Video-Id    │  │   Selector   │  │   Script     │           │
//! │  │  Resolver    │  │   Builder    │  │   Loader     │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │  ┌──────┴───────┐  ┌──────┴───────┐         │                   │
//! │  │   YouTube    │  │     HLS      │◀────────┘                   │
//! │  │   Adapter    │  │   Adapter    │                             │
//! │  └──────┬───────┘  └──────┬───────┘                             │
//! │         │                 │                                     │
//! │  ┌──────┴─────────────────┴──────┐  ┌──────────────┐            │
//! │  │  HostPlayer / VideoElement    │  │  Readiness   │            │
//! │  │  (implemented by bindings)    │  │    Gate      │            │
//! │  └───────────────────────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod hls;
pub mod host;
pub mod media;
pub mod readiness;
pub mod script;
pub mod selector;
pub mod types;
pub mod youtube;
pub mod youtube_id;

pub use adapter::{Capabilities, SourceAdapter};
pub use config::{HlsConfig, PluginOptions, SelectorConfig, YoutubeConfig};
pub use error::{Error, Result};
pub use hls::{HlsAdapter, HlsBackend, HlsInit, HlsOptions, HlsRuntime};
pub use host::{HostPlayer, VideoElement};
pub use media::MediaControllable;
pub use readiness::{Readiness, ReadinessGate};
pub use script::{ensure_script, ScriptEnvironment, ScriptStatus};
pub use selector::{AudioTrack, QualityLevel, SelectorItem, SelectorKind, SelectorPanel};
pub use types::{EmbedState, EventPayload, HostEvent, PlaybackSource, VideoId};
pub use youtube::{EmbedContainer, EmbedOptions, EmbedProxy, IntervalTimer, YoutubeAdapter, YoutubeEmbed};
pub use youtube_id::{is_youtube, parse_video_id};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version
pub fn init() {
    tracing::info!(version = VERSION, "Artplug Core initialized");
}
