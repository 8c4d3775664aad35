//! Command-line argument definitions using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::{resolve_quality, Config, InputMode, OutputFormat};

/// Video, playlist and audio downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tube-snapper",
    version,
    about = "Download videos, playlists and audio tracks",
    long_about = "Downloads the best video stream up to a quality ceiling together with the best \
                  audio stream and merges them with ffmpeg, or extracts audio as mp3.\n\n\
                  Please check the platform's terms of service before using this tool.",
    group(ArgGroup::new("input").args(["video", "playlist", "file"]).multiple(false))
)]
pub struct Args {
    /// Download the video(s) at the given URL(s).
    #[arg(short = 'v', long, value_name = "VIDEO_URL", num_args = 1..)]
    pub video: Option<Vec<String>>,

    /// Download all videos in the given playlist.
    #[arg(short = 'p', long, value_name = "PLAYLIST_URL")]
    pub playlist: Option<String>,

    /// Download all URLs listed in a text file (one per line).
    #[arg(short = 'f', long, value_name = "FILE_PATH")]
    pub file: Option<PathBuf>,

    /// Maximum video resolution, e.g. 720p (defaults to 1080p).
    #[arg(short = 'q', long)]
    pub quality: Option<String>,

    /// Merge into an mkv container instead of mp4.
    #[arg(long, conflicts_with = "mp3")]
    pub mkv: bool,

    /// Extract audio only, as mp3.
    #[arg(long)]
    pub mp3: bool,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of passes over failing URLs before giving up.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Seconds to wait after a failed download.
    #[arg(long)]
    pub retry_delay: Option<u64>,

    /// Path to the ffmpeg binary.
    #[arg(long, env = "TUBE_SNAPPER_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the yt-dlp binary.
    #[arg(long = "yt-dlp", env = "TUBE_SNAPPER_YTDLP")]
    pub ytdlp: Option<PathBuf>,

    /// Replace files that already exist.
    #[arg(long)]
    pub overwrite: bool,

    /// Hide download progress bars.
    #[arg(long)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// The selected input mode, if any.
    pub fn input_mode(&self) -> Option<InputMode> {
        if let Some(urls) = &self.video {
            Some(InputMode::Videos(urls.clone()))
        } else if let Some(url) = &self.playlist {
            Some(InputMode::Playlist(url.clone()))
        } else {
            self.file.clone().map(InputMode::File)
        }
    }

    /// The selected output format, if a flag was given.
    pub fn output_format(&self) -> Option<OutputFormat> {
        if self.mp3 {
            Some(OutputFormat::Mp3)
        } else if self.mkv {
            Some(OutputFormat::Mkv)
        } else {
            None
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(quality) = &self.quality {
            config.options.quality = resolve_quality(Some(quality));
        }

        if let Some(format) = self.output_format() {
            config.options.output_format = format;
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = dir.clone();
        }

        if let Some(retries) = self.retries {
            config.options.max_passes = retries;
        }

        if let Some(delay) = self.retry_delay {
            config.options.retry_delay_seconds = delay;
        }

        if let Some(ffmpeg) = &self.ffmpeg {
            config.tools.ffmpeg_path = ffmpeg.clone();
        }

        if let Some(ytdlp) = &self.ytdlp {
            config.tools.ytdlp_path = ytdlp.clone();
        }

        // Boolean flags (only override if set to non-default)
        if self.overwrite {
            config.options.overwrite = true;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
