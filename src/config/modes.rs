//! Input and output mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where the list of target URLs comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// One or more direct video URLs.
    Videos(Vec<String>),
    /// A playlist URL, expanded into its entries.
    Playlist(String),
    /// A newline-delimited text file of URLs.
    File(PathBuf),
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Videos(urls) => write!(f, "videos ({})", urls.len()),
            InputMode::Playlist(url) => write!(f, "playlist ({})", url),
            InputMode::File(path) => write!(f, "file ({})", path.display()),
        }
    }
}

/// Final output container or codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Video and audio muxed into mp4, with the thumbnail embedded (default).
    #[default]
    Mp4,
    /// Video and audio stream-copied into mkv.
    Mkv,
    /// Audio only, transcoded to mp3.
    Mp3,
}

impl OutputFormat {
    /// File extension of the final output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mkv => "mkv",
            OutputFormat::Mp3 => "mp3",
        }
    }

    /// Whether only an audio stream is needed.
    pub fn is_audio_only(&self) -> bool {
        matches!(self, OutputFormat::Mp3)
    }

    /// Whether the thumbnail is embedded as cover art.
    pub fn embeds_thumbnail(&self) -> bool {
        matches!(self, OutputFormat::Mp4)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp4" => Ok(OutputFormat::Mp4),
            "mkv" => Ok(OutputFormat::Mkv),
            "mp3" => Ok(OutputFormat::Mp3),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("MKV".parse::<OutputFormat>().unwrap(), OutputFormat::Mkv);
        assert_eq!("mp3".parse::<OutputFormat>().unwrap(), OutputFormat::Mp3);
        assert!("avi".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_traits() {
        assert!(OutputFormat::Mp3.is_audio_only());
        assert!(!OutputFormat::Mkv.is_audio_only());
        assert!(OutputFormat::Mp4.embeds_thumbnail());
        assert!(!OutputFormat::Mkv.embeds_thumbnail());
        assert_eq!(OutputFormat::default().extension(), "mp4");
    }
}
