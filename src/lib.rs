//! Tube Snapper - download videos, playlists and audio tracks.
//!
//! Streams are discovered through an external extractor (yt-dlp), the best
//! candidates are fetched over HTTP and assembled with ffmpeg.
//!
//! # Features
//!
//! - Download one or more videos, a whole playlist, or a file of links
//! - Best video stream up to a quality ceiling, with progressive fallback
//! - Best audio stream by bitrate, muxed into mp4/mkv or transcoded to mp3
//! - Bounded pass-based retries of failed downloads
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tube_snapper::{Config, Downloader, RetryDriver, YtDlpSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let source = Arc::new(YtDlpSource::from_config(&config));
//!     let downloader = Downloader::new(
//!         source,
//!         &config,
//!         config.options.download_directory.clone(),
//!     )?;
//!
//!     let urls = vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()];
//!     let downloader = &downloader;
//!     RetryDriver::from_config(&config)
//!         .run(&urls, move |url| async move {
//!             downloader.download(&url).await.map(|_| ())
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod mux;
pub mod output;
pub mod process;
pub mod stream;

// Re-exports for convenience
pub use config::{Config, InputMode, OutputFormat};
pub use download::{resolve_targets, Downloader, RetryDriver, RunReport, Targets};
pub use error::{Error, Result};
pub use stream::{MediaInfo, StreamCandidate, StreamSource, YtDlpSource};
