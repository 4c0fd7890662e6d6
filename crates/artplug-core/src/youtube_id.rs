//! YouTube video-id resolution
//!
//! Accepts anything a viewer might paste: a bare id, a watch/short/embed/live
//! URL, a `youtu.be` share link or a `youtube-nocookie.com` embed. Input that
//! does not identify a video yields `None`, never an error.

use crate::types::VideoId;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hosts (and their subdomains) treated as YouTube
pub const YOUTUBE_HOSTS: [&str; 4] = ["youtube.com", "m.youtube.com", "youtu.be", "youtube-nocookie.com"];

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("static id pattern"));

// Scan used when the input is not a well-formed URL
static LOOSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|v=|/(?:shorts|embed|live)/)([A-Za-z0-9_-]{11})")
        .expect("static scan pattern")
});

/// True for an exact 11-character id token
pub fn is_video_id(token: &str) -> bool {
    ID_PATTERN.is_match(token)
}

/// True when the input identifies a YouTube video
pub fn is_youtube(input: &str) -> bool {
    parse_video_id(input).is_some()
}

/// Extract the canonical video id from a URL or bare id
pub fn parse_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(id) = VideoId::new(input) {
        return Some(id);
    }

    match Url::parse(input) {
        Ok(url) => from_url(&url),
        Err(_) => LOOSE_PATTERN
            .captures(input)
            .and_then(|caps| caps.get(1))
            .and_then(|m| VideoId::new(m.as_str())),
    }
}

fn from_url(url: &Url) -> Option<VideoId> {
    let host = normalized_host(url)?;
    if !is_youtube_host(&host) {
        return None;
    }

    if host == "youtu.be" || host.ends_with(".youtu.be") {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .and_then(VideoId::new);
    }

    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "v")
        .and_then(|(_, value)| VideoId::new(&value));
    if from_query.is_some() {
        return from_query;
    }

    // /shorts/<id>, /embed/<id>, /live/<id>
    url.path_segments()?.find_map(VideoId::new)
}

fn normalized_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    })
}

fn is_youtube_host(host: &str) -> bool {
    YOUTUBE_HOSTS
        .iter()
        .any(|known| host == *known || host.ends_with(&format!(".{known}")))
}
