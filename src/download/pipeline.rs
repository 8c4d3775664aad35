//! Per-URL download pipelines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::config::{Config, OptionsConfig, OutputFormat};
use crate::download::fetch::{build_client, download_stream, download_thumbnail};
use crate::error::Result;
use crate::fs::output_file_name;
use crate::mux::{Ffmpeg, TempWorkspace};
use crate::stream::{MediaInfo, StreamCandidate, StreamSource};

/// Downloads single media items into one target directory.
pub struct Downloader {
    source: Arc<dyn StreamSource>,
    client: Client,
    ffmpeg: Ffmpeg,
    options: OptionsConfig,
    target_dir: PathBuf,
    /// Output paths handed out this run, keyed to the media ID using them.
    claimed: Mutex<HashMap<PathBuf, String>>,
}

/// Where a media item ends up.
enum Destination {
    /// Already present from an earlier run.
    Existing(PathBuf),
    /// Free to be written.
    Fresh(PathBuf),
}

impl Downloader {
    pub fn new(source: Arc<dyn StreamSource>, config: &Config, target_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            source,
            client: build_client()?,
            ffmpeg: Ffmpeg::from_config(config),
            options: config.options.clone(),
            target_dir,
            claimed: Mutex::new(HashMap::new()),
        })
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Download `url` in the configured output format.
    pub async fn download(&self, url: &str) -> Result<PathBuf> {
        if self.options.output_format.is_audio_only() {
            self.download_audio(url).await
        } else {
            self.download_video(url).await
        }
    }

    /// Download the best video under the quality ceiling, muxing in the
    /// best audio stream when the video has none.
    pub async fn download_video(&self, url: &str) -> Result<PathBuf> {
        let info = self.source.fetch_media(url).await?;
        let video = info.select_video(self.options.quality)?;

        tracing::info!("title={}", info.title);
        log_video(video);

        let format = self.options.output_format;

        if !video.is_video_only() {
            let output = match self.destination(&info, &video.container).await {
                Destination::Existing(path) => return Ok(path),
                Destination::Fresh(path) => path,
            };

            tracing::info!("Downloading video with embedded audio...");
            let workspace = TempWorkspace::create(&self.target_dir).await?;
            let temp = workspace.file(&format!("video.{}", video.container));
            download_stream(&self.client, video, &temp, self.options.show_progress).await?;

            return finish(&temp, &output).await;
        }

        let output = match self.destination(&info, format.extension()).await {
            Destination::Existing(path) => return Ok(path),
            Destination::Fresh(path) => path,
        };

        let audio = info.select_audio()?;
        log_audio(audio);

        let workspace = TempWorkspace::create(&self.target_dir).await?;
        let video_path = workspace.file(&format!("video.{}", video.container));
        let audio_path = workspace.file(&format!("audio.{}", audio.container));

        download_stream(&self.client, video, &video_path, self.options.show_progress).await?;
        download_stream(&self.client, audio, &audio_path, self.options.show_progress).await?;

        let thumbnail = if format.embeds_thumbnail() {
            self.fetch_thumbnail(&info, workspace.path()).await
        } else {
            None
        };

        let muxed = workspace.file(&format!("output.{}", format.extension()));
        self.ffmpeg
            .mux(&video_path, &audio_path, thumbnail.as_deref(), &muxed, format)
            .await?;

        finish(&muxed, &output).await
    }

    /// Download the best audio stream and transcode it to mp3.
    pub async fn download_audio(&self, url: &str) -> Result<PathBuf> {
        let info = self.source.fetch_media(url).await?;
        let audio = info.select_audio()?;

        tracing::info!("title={}", info.title);
        log_audio(audio);

        let output = match self.destination(&info, OutputFormat::Mp3.extension()).await {
            Destination::Existing(path) => return Ok(path),
            Destination::Fresh(path) => path,
        };

        let workspace = TempWorkspace::create(&self.target_dir).await?;
        let audio_path = workspace.file(&format!("audio.{}", audio.container));
        download_stream(&self.client, audio, &audio_path, self.options.show_progress).await?;

        let converted = workspace.file("output.mp3");
        self.ffmpeg.transcode_audio(&audio_path, &converted).await?;

        finish(&converted, &output).await
    }

    /// Thumbnails are optional; failures only produce a warning.
    async fn fetch_thumbnail(&self, info: &MediaInfo, dir: &Path) -> Option<PathBuf> {
        let url = info.thumbnail_url.as_deref()?;

        match download_thumbnail(&self.client, url, dir).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Could not fetch thumbnail for {}: {}", info.title, e);
                None
            }
        }
    }

    /// Claim the output path for `info`.
    ///
    /// A title already claimed this run by a different item gets its ID
    /// appended, so playlist entries sharing a title do not shadow each other.
    /// Retries of the same item get the same path back.
    async fn destination(&self, info: &MediaInfo, extension: &str) -> Destination {
        let mut claimed = self.claimed.lock().await;

        let mut output = self
            .target_dir
            .join(output_file_name(&info.title, extension));

        if claimed.get(&output).is_some_and(|owner| *owner != info.id) {
            let renamed = output_file_name(&format!("{} [{}]", info.title, info.id), extension);
            tracing::warn!(
                "Duplicate title '{}', saving {} as {}",
                info.title,
                info.url,
                renamed
            );
            output = self.target_dir.join(renamed);
        }

        claimed.insert(output.clone(), info.id.clone());

        if !self.options.overwrite && output.exists() {
            tracing::info!("Skipping existing file: {}", output.display());
            Destination::Existing(output)
        } else {
            Destination::Fresh(output)
        }
    }
}

/// Move a finished file from the workspace to its final location.
async fn finish(from: &Path, to: &Path) -> Result<PathBuf> {
    tokio::fs::rename(from, to).await?;
    tracing::info!("Saved: {}", to.display());
    Ok(to.to_path_buf())
}

fn log_video(video: &StreamCandidate) {
    tracing::info!("video_res={}", video.resolution_label());
    tracing::info!("video_fps={}", video.fps.unwrap_or(0.0));
    tracing::info!("video_filetype={}", video.container);
    tracing::info!(
        "video_codec={}",
        video.video_codec.as_deref().unwrap_or("unknown")
    );
}

fn log_audio(audio: &StreamCandidate) {
    tracing::info!("audio_abr={}kbps", audio.effective_audio_bitrate());
    tracing::info!("audio_filetype={}", audio.container);
    tracing::info!(
        "audio_codec={}",
        audio.audio_codec.as_deref().unwrap_or("unknown")
    );
}
