//! Error types for the tube-snapper application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Extraction errors
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Extractor error: {0}")]
    Extractor(String),

    #[error("No {kind} stream available for {url}")]
    NoStream { url: String, kind: StreamKind },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Giving up after repeated failures on {} URL(s)", .failed.len())]
    RetryExhausted { failed: Vec<String> },

    // File system errors
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    // External tool errors
    #[error("FFmpeg error: {0}")]
    FFmpeg(String),

    #[error("FFmpeg not found. Please install ffmpeg and ensure it's in your PATH.")]
    FFmpegNotFound,

    #[error("yt-dlp not found. Please install yt-dlp and ensure it's in your PATH.")]
    ExtractorNotFound,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Which half of a media item a selection was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
    pub const DOWNLOAD_ERROR: i32 = 3;
    pub const SOME_URLS_FAILED: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
