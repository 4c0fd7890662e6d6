//! Quality and audio-track selectors
//!
//! Builds the `{html, value, default}` lists Artplayer's control bar and
//! setting panel render from hls.js levels and audio tracks, plus the panel
//! descriptors that carry them.

use crate::config::SelectorConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;

/// Value of the synthetic automatic quality entry
pub const AUTO_LEVEL: i32 = -1;

/// Width of the setting panel sub-menu
pub const SETTING_WIDTH: u32 = 200;

/// A rendition as reported by `hls.levels`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityLevel {
    pub name: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub bitrate: Option<u64>,
}

impl QualityLevel {
    pub fn with_height(height: u32) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }
}

/// An audio rendition as reported by `hls.audioTracks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTrack {
    pub id: i32,
    pub name: Option<String>,
    #[serde(alias = "language")]
    pub lang: Option<String>,
}

/// One choice in a selector list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorItem {
    #[serde(rename = "html")]
    pub label: String,
    pub value: i32,
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

impl SelectorItem {
    pub fn new(label: impl Into<String>, value: i32, is_default: bool) -> Self {
        Self {
            label: label.into(),
            value,
            is_default,
        }
    }
}

/// Naming function for a level or track; receives the item and its index
pub type LabelFn<T> = Rc<dyn Fn(&T, usize) -> String>;

/// Default quality label: name, then height, then bitrate, then index
pub fn default_quality_label(level: &QualityLevel, index: usize) -> String {
    if let Some(name) = level.name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match (level.height, level.bitrate) {
        (Some(height), _) if height > 0 => format!("{height}P"),
        (_, Some(bitrate)) if bitrate > 0 => format!("{}kbps", bitrate / 1000),
        _ => format!("Level {index}"),
    }
}

/// Default audio label: name, then language, then track id
pub fn default_audio_label(track: &AudioTrack, _index: usize) -> String {
    track
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .or_else(|| track.lang.as_deref().filter(|l| !l.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Track {}", track.id))
}

/// Keep the first item per label, preserving order
pub fn dedup_by_label(items: Vec<SelectorItem>) -> Vec<SelectorItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.label.clone()))
        .collect()
}

// Clear every default flag after the first
fn single_default(items: &mut [SelectorItem]) {
    let mut found = false;
    for item in items.iter_mut() {
        if item.is_default {
            item.is_default = !found;
            found = true;
        }
    }
}

/// Which hls.js selection a panel drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Quality,
    Audio,
}

impl SelectorKind {
    /// Registry name in the control bar and setting panel
    pub fn panel_name(&self) -> &'static str {
        match self {
            SelectorKind::Quality => "hls-quality",
            SelectorKind::Audio => "hls-audio",
        }
    }

    /// Inverse of [`SelectorKind::panel_name`]
    pub fn from_panel_name(name: &str) -> Option<Self> {
        match name {
            "hls-quality" => Some(SelectorKind::Quality),
            "hls-audio" => Some(SelectorKind::Audio),
            _ => None,
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            SelectorKind::Quality => "Quality",
            SelectorKind::Audio => "Audio",
        }
    }

    /// Artplayer icon key for the setting panel
    pub fn icon(&self) -> &'static str {
        match self {
            SelectorKind::Quality => "quality",
            SelectorKind::Audio => "audio",
        }
    }
}

/// A built selector ready to be pushed to the host
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPanel {
    pub kind: SelectorKind,
    pub title: String,
    /// Label of the currently active choice
    pub current_label: String,
    pub items: Vec<SelectorItem>,
}

impl SelectorPanel {
    pub fn control_descriptor(&self) -> ControlDescriptor {
        ControlDescriptor {
            name: self.kind.panel_name(),
            position: "right",
            html: self.current_label.clone(),
            style: ControlStyle { padding: "0 10px" },
            selector: self.items.clone(),
        }
    }

    pub fn setting_descriptor(&self) -> SettingDescriptor {
        SettingDescriptor {
            name: self.kind.panel_name(),
            tooltip: self.current_label.clone(),
            html: self.title.clone(),
            icon: self.kind.icon(),
            width: SETTING_WIDTH,
            selector: self.items.clone(),
        }
    }

    /// Notice text shown after a selection
    pub fn notice_for(&self, item: &SelectorItem) -> String {
        format!("{}: {}", self.title, item.label)
    }
}

/// Control bar entry (`art.controls.update`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlDescriptor {
    pub name: &'static str,
    pub position: &'static str,
    pub html: String,
    pub style: ControlStyle,
    pub selector: Vec<SelectorItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlStyle {
    pub padding: &'static str,
}

/// Setting panel entry (`art.setting.update`); `icon` names a key in `art.icons`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDescriptor {
    pub name: &'static str,
    pub tooltip: String,
    pub html: String,
    pub icon: &'static str,
    pub width: u32,
    pub selector: Vec<SelectorItem>,
}

/// Build the quality selector
///
/// Entries are deduplicated by label and listed by descending level index,
/// followed by the automatic entry. A level labelled like the automatic
/// entry is left out.
pub fn quality_selector(
    levels: &[QualityLevel],
    current_level: i32,
    config: &SelectorConfig,
    label: &dyn Fn(&QualityLevel, usize) -> String,
) -> SelectorPanel {
    let auto = config.auto_label();
    let current_label = usize::try_from(current_level)
        .ok()
        .and_then(|index| levels.get(index).map(|level| label(level, index)))
        .unwrap_or_else(|| auto.to_string());

    let items = levels
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let value = index as i32;
            SelectorItem::new(label(level, index), value, value == current_level)
        })
        .filter(|item| item.label != auto)
        .collect();

    let mut items = dedup_by_label(items);
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items.push(SelectorItem::new(auto, AUTO_LEVEL, current_level == AUTO_LEVEL));
    single_default(&mut items);

    SelectorPanel {
        kind: SelectorKind::Quality,
        title: config.title_or(SelectorKind::Quality.default_title()).to_string(),
        current_label,
        items,
    }
}

/// Build the audio selector; order follows the track list
pub fn audio_selector(
    tracks: &[AudioTrack],
    current_track: i32,
    config: &SelectorConfig,
    label: &dyn Fn(&AudioTrack, usize) -> String,
) -> SelectorPanel {
    let current_label = tracks
        .iter()
        .enumerate()
        .find(|(_, track)| track.id == current_track)
        .map(|(index, track)| label(track, index))
        .unwrap_or_else(|| config.auto_label().to_string());

    let items = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            SelectorItem::new(label(track, index), track.id, track.id == current_track)
        })
        .collect();

    let mut items = dedup_by_label(items);
    single_default(&mut items);

    SelectorPanel {
        kind: SelectorKind::Audio,
        title: config.title_or(SelectorKind::Audio.default_title()).to_string(),
        current_label,
        items,
    }
}
