//! Configuration validation logic.

use crate::config::loader::{Config, DEFAULT_QUALITY};
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.options.max_passes == 0 {
        return Err(Error::ConfigValidation {
            field: "max_passes".to_string(),
            message: "At least one download pass is required".to_string(),
        });
    }

    if config.options.quality == 0 {
        return Err(Error::ConfigValidation {
            field: "quality".to_string(),
            message: "Quality ceiling must be a positive height".to_string(),
        });
    }

    if config.tools.ffmpeg_path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "ffmpeg_path".to_string(),
            message: "Path to ffmpeg cannot be empty".to_string(),
        });
    }

    if config.tools.ytdlp_path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "ytdlp_path".to_string(),
            message: "Path to yt-dlp cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Parse a resolution string such as `720p` into its height.
///
/// Only 3 or 4 digits followed by `p` are accepted, and zero is rejected.
pub fn parse_quality(input: &str) -> Option<u32> {
    let pattern = Regex::new(r"^\d{3,4}p$").unwrap();
    let input = input.trim();

    if !pattern.is_match(input) {
        return None;
    }

    input[..input.len() - 1]
        .parse::<u32>()
        .ok()
        .filter(|quality| *quality > 0)
}

/// Resolve the quality option, falling back to 1080p when absent or invalid.
pub fn resolve_quality(input: Option<&str>) -> u32 {
    match input {
        None => DEFAULT_QUALITY,
        Some(raw) => parse_quality(raw).unwrap_or_else(|| {
            tracing::warn!(
                "Ignoring invalid quality '{}', using {}p",
                raw,
                DEFAULT_QUALITY
            );
            DEFAULT_QUALITY
        }),
    }
}

/// Check that a target URL is an absolute http(s) URL.
pub fn validate_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("Unsupported scheme '{}' in {}", other, input),
        }),
    }
}
