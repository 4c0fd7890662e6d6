//! CLI command implementations

use anyhow::{bail, Context, Result};
use artplug_core::selector::{
    audio_selector, default_audio_label, default_quality_label, quality_selector, SelectorPanel, AUTO_LEVEL,
};
use artplug_core::youtube::{ContainerSpec, EmbedOptions};
use artplug_core::{parse_video_id, AudioTrack, Error, PlaybackSource, QualityLevel, SelectorConfig, SelectorItem};
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tabled::Tabled;
use tracing::{debug, info};
use url::Url;

use crate::output::{to_json, to_table, OutputFormat};

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// What `probe` found out about a source
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub input: String,
    pub kind: &'static str,
    #[tabled(display_with = "display_option")]
    pub plugin: Option<String>,
    #[tabled(display_with = "display_option")]
    pub host: Option<String>,
    #[tabled(display_with = "display_option")]
    pub video_id: Option<String>,
    #[tabled(display_with = "display_option")]
    pub watch_url: Option<String>,
    #[tabled(display_with = "display_option")]
    pub embed_url: Option<String>,
}

impl ProbeReport {
    pub fn new(input: &str) -> Self {
        let source = PlaybackSource::detect(input);
        let host = Url::parse(input.trim())
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));
        let video_id = match &source {
            Some(PlaybackSource::Youtube { video_id }) => Some(video_id.clone()),
            _ => None,
        };

        Self {
            input: input.to_string(),
            kind: match &source {
                Some(PlaybackSource::Hls { .. }) => "hls",
                Some(PlaybackSource::Youtube { .. }) => "youtube",
                None => "unknown",
            },
            plugin: source.as_ref().map(|s| s.plugin_name().to_string()),
            host,
            video_id: video_id.as_ref().map(|id| id.to_string()),
            watch_url: video_id.as_ref().map(|id| id.watch_url()),
            embed_url: video_id.as_ref().map(|id| id.embed_url()),
        }
    }

    pub fn is_known(&self) -> bool {
        self.plugin.is_some()
    }
}

/// Detect which plugin handles a source
pub fn probe(input: &str, format: &str) -> Result<()> {
    let report = ProbeReport::new(input);
    let known = report.is_known();
    debug!(kind = report.kind, "Probed source");

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&report)),
        OutputFormat::Table => println!("{}", to_table([report])),
        OutputFormat::Text => {
            println!("Source: {}", report.input);
            println!("  Kind: {}", style(report.kind).bold());
            println!("  Plugin: {}", display_option(&report.plugin));
            println!("  Host: {}", display_option(&report.host));
            if let Some(video_id) = &report.video_id {
                println!("  Video id: {}", style(video_id).green());
                println!("  Watch: {}", display_option(&report.watch_url));
                println!("  Embed: {}", display_option(&report.embed_url));
            }
        }
    }

    if !known {
        bail!("no plugin handles {input:?}");
    }
    Ok(())
}

/// Container and player options a YouTube source would be embedded with
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedPreview {
    pub container_id: String,
    pub container_style: BTreeMap<&'static str, &'static str>,
    pub options: EmbedOptions,
}

impl EmbedPreview {
    pub fn new(input: &str, autoplay: bool) -> Result<Self> {
        let video_id = parse_video_id(input).ok_or(Error::InvalidYoutubeUrl)?;
        let container = ContainerSpec::for_video(&video_id);
        Ok(Self {
            container_id: container.id,
            container_style: container.style.iter().copied().collect(),
            options: EmbedOptions::new(video_id, autoplay),
        })
    }
}

#[derive(Tabled)]
struct StyleRow {
    property: &'static str,
    value: &'static str,
}

/// Print the YouTube player options for a source
pub fn embed(input: &str, autoplay: bool, format: &str) -> Result<()> {
    let preview = EmbedPreview::new(input, autoplay)?;
    info!(video_id = %preview.options.video_id, "Embed options built");

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&preview)),
        OutputFormat::Table => {
            println!("Container #{}", preview.container_id);
            let rows = preview
                .container_style
                .iter()
                .map(|(&property, &value)| StyleRow { property, value });
            println!("{}", to_table(rows));
            println!("{}", to_json(&preview.options));
        }
        OutputFormat::Text => {
            println!("Container: #{}", style(&preview.container_id).bold());
            for (property, value) in &preview.container_style {
                println!("  {property}: {value}");
            }
            println!("Player options:");
            println!("{}", to_json(&preview.options));
        }
    }

    Ok(())
}

/// hls.js state captured from a running player
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamSnapshot {
    pub levels: Vec<QualityLevel>,
    pub current_level: i32,
    pub audio_tracks: Vec<AudioTrack>,
    pub audio_track: i32,
    pub quality: SelectorConfig,
    pub audio: SelectorConfig,
}

impl Default for StreamSnapshot {
    fn default() -> Self {
        Self {
            levels: Vec::new(),
            current_level: AUTO_LEVEL,
            audio_tracks: Vec::new(),
            audio_track: -1,
            quality: SelectorConfig::default(),
            audio: SelectorConfig::default(),
        }
    }
}

impl StreamSnapshot {
    /// Panels the HLS plugin would publish; empty lists produce none
    pub fn panels(&self) -> Vec<SelectorPanel> {
        let mut panels = Vec::new();
        if !self.levels.is_empty() {
            panels.push(quality_selector(
                &self.levels,
                self.current_level,
                &self.quality,
                &default_quality_label,
            ));
        }
        if !self.audio_tracks.is_empty() {
            panels.push(audio_selector(
                &self.audio_tracks,
                self.audio_track,
                &self.audio,
                &default_audio_label,
            ));
        }
        panels
    }
}

#[derive(Debug, Serialize)]
struct PanelView<'a> {
    panel: &'static str,
    title: &'a str,
    current: &'a str,
    items: &'a [SelectorItem],
}

#[derive(Tabled)]
struct SelectorRow<'a> {
    panel: &'static str,
    label: &'a str,
    value: i32,
    #[tabled(rename = "default")]
    marker: &'static str,
}

/// Build the quality and audio selectors from a stream snapshot
pub fn selectors(path: &Path, format: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: StreamSnapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    let panels = snapshot.panels();
    debug!(panels = panels.len(), "Selectors built");

    match OutputFormat::from(format) {
        OutputFormat::Json => {
            let views: Vec<PanelView<'_>> = panels
                .iter()
                .map(|p| PanelView {
                    panel: p.kind.panel_name(),
                    title: &p.title,
                    current: &p.current_label,
                    items: &p.items,
                })
                .collect();
            println!("{}", to_json(&views));
        }
        OutputFormat::Table => {
            let rows = panels.iter().flat_map(|p| {
                p.items.iter().map(move |item| SelectorRow {
                    panel: p.kind.panel_name(),
                    label: &item.label,
                    value: item.value,
                    marker: if item.is_default { "*" } else { "" },
                })
            });
            println!("{}", to_table(rows));
        }
        OutputFormat::Text => {
            if panels.is_empty() {
                println!("No levels or audio tracks in snapshot");
            }
            for panel in &panels {
                println!("{} (current: {})", style(&panel.title).bold(), panel.current_label);
                for item in &panel.items {
                    let marker = if item.is_default { "*" } else { " " };
                    println!("  {marker} {:<12} {}", item.label, item.value);
                }
            }
        }
    }

    Ok(())
}
