//! Error types for Artplug Core

use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Adapter error types
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("Invalid YouTube URL")]
    InvalidYoutubeUrl,

    // Environment errors
    #[error("Failed to load {library} library")]
    ScriptLoad { library: String, src: String },

    #[error("{0} playback is not supported in this browser")]
    Unsupported(String),

    #[error("Unsupported playback format: {0}")]
    UnsupportedFormat(String),

    // Invariant violations
    #[error("Cannot find instance of HLS from \"art.hls\"")]
    HlsInstanceMissing,

    // External player errors
    #[error("Embed call {method} failed: {message}")]
    Embed { method: &'static str, message: String },

    #[error("Host call failed: {0}")]
    Host(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an embed error for a failed remote-control call
    pub fn embed(method: &'static str, message: impl Into<String>) -> Self {
        Error::Embed {
            method,
            message: message.into(),
        }
    }

    /// Create a script load error
    pub fn script_load(library: impl Into<String>, src: impl Into<String>) -> Self {
        Error::ScriptLoad {
            library: library.into(),
            src: src.into(),
        }
    }

    /// Returns true if this error should be shown to the viewer as a notice
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::InvalidYoutubeUrl
                | Error::ScriptLoad { .. }
                | Error::Unsupported(_)
                | Error::UnsupportedFormat(_)
        )
    }

    /// Returns the error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidYoutubeUrl => "INVALID_YOUTUBE_URL",
            Error::ScriptLoad { .. } => "SCRIPT_LOAD",
            Error::Unsupported(_) => "UNSUPPORTED",
            Error::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Error::HlsInstanceMissing => "HLS_INSTANCE_MISSING",
            Error::Embed { .. } => "EMBED",
            Error::Host(_) => "HOST",
            Error::Json(_) => "JSON",
        }
    }
}
