//! Configuration structures and loading logic.

use crate::config::modes::OutputFormat;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default maximum video height.
pub const DEFAULT_QUALITY: u32 = 1080;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default = "default_download_directory")]
    pub download_directory: PathBuf,

    /// Maximum video height in lines (the quality ceiling).
    #[serde(default = "default_quality")]
    pub quality: u32,

    /// Output container or codec.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Maximum number of passes over the failing URLs.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,

    /// Seconds to wait after each failed URL.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: u64,

    /// Whether to show download progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Whether to replace output files that already exist.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: default_download_directory(),
            quality: DEFAULT_QUALITY,
            output_format: OutputFormat::default(),
            max_passes: default_max_passes(),
            retry_delay_seconds: default_retry_delay(),
            show_progress: true,
            overwrite: false,
        }
    }
}

/// External tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the yt-dlp binary.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    /// Seconds before a metadata query to yt-dlp is abandoned.
    #[serde(default = "default_extractor_timeout")]
    pub extractor_timeout_seconds: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            ytdlp_path: default_ytdlp_path(),
            extractor_timeout_seconds: default_extractor_timeout(),
        }
    }
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_quality() -> u32 {
    DEFAULT_QUALITY
}

fn default_max_passes() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_true() -> bool {
    true
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_extractor_timeout() -> u64 {
    120
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Platform default location of the configuration file.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "tube-snapper")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Fixed pause applied after each failed URL.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.options.retry_delay_seconds)
    }

    /// Time limit for one extractor query.
    pub fn extractor_timeout(&self) -> Duration {
        Duration::from_secs(self.tools.extractor_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.options.quality, 1080);
        assert_eq!(config.options.max_passes, 3);
        assert_eq!(config.options.output_format, OutputFormat::Mp4);
        assert_eq!(config.tools.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert!(config.options.show_progress);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [options]
            quality = 720
            output_format = "mkv"
            download_directory = "/tmp/videos"

            [tools]
            ytdlp_path = "/opt/bin/yt-dlp"
            "#,
        )
        .unwrap();

        assert_eq!(config.options.quality, 720);
        assert_eq!(config.options.output_format, OutputFormat::Mkv);
        assert_eq!(config.options.download_directory, PathBuf::from("/tmp/videos"));
        assert_eq!(config.options.retry_delay_seconds, 1);
        assert_eq!(config.tools.ytdlp_path, PathBuf::from("/opt/bin/yt-dlp"));
        assert_eq!(config.tools.ffmpeg_path, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.options.quality = 480;
        config.options.output_format = OutputFormat::Mp3;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.options.quality, 480);
        assert_eq!(loaded.options.output_format, OutputFormat::Mp3);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.options.quality, DEFAULT_QUALITY);
        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
