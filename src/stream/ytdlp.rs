//! Stream source backed by the yt-dlp command-line extractor.
//!
//! Only yt-dlp's JSON dump (`-J`) is used; downloading the selected streams
//! is done by this crate over plain HTTP.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::process::{run_tool, ToolOutput};
use crate::stream::candidate::{MediaInfo, PlaylistInfo, StreamCandidate};
use crate::stream::source::StreamSource;

/// yt-dlp JSON for a single video.
#[derive(Debug, Deserialize)]
struct RawMedia {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

/// yt-dlp JSON for one entry of `formats`.
#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    fps: Option<f64>,
    #[serde(default)]
    tbr: Option<f64>,
    #[serde(default)]
    abr: Option<f64>,
    #[serde(default)]
    filesize: Option<u64>,
    #[serde(default)]
    filesize_approx: Option<f64>,
    #[serde(default)]
    http_headers: BTreeMap<String, String>,
}

/// yt-dlp JSON for a flat playlist.
#[derive(Debug, Deserialize)]
struct RawPlaylist {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
}

/// [`StreamSource`] that shells out to yt-dlp.
pub struct YtDlpSource {
    executable: PathBuf,
    timeout: Duration,
}

impl YtDlpSource {
    pub fn new(executable: PathBuf, timeout: Duration) -> Self {
        Self {
            executable,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tools.ytdlp_path.clone(), config.extractor_timeout())
    }

    /// Run yt-dlp and return its stdout, mapping failures to fetch errors.
    async fn dump_json(&self, url: &str, extra: &[&str]) -> Result<String> {
        let mut args: Vec<&str> = vec!["-J", "--no-warnings"];
        args.extend_from_slice(extra);
        args.push("--");
        args.push(url);

        let output = run_tool(&self.executable, &args, Some(self.timeout))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::ExtractorNotFound,
                io::ErrorKind::TimedOut => Error::Fetch {
                    url: url.to_string(),
                    message: e.to_string(),
                },
                _ => Error::Extractor(format!("Failed to run yt-dlp: {}", e)),
            })?;

        if !output.success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                message: extractor_message(&output),
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl StreamSource for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch_media(&self, url: &str) -> Result<MediaInfo> {
        let json = self.dump_json(url, &["--no-playlist"]).await?;
        parse_media(&json, url)
    }

    async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo> {
        let json = self.dump_json(url, &["--flat-playlist"]).await?;
        parse_playlist(&json)
    }
}

/// Pull the most useful line out of a failed yt-dlp run.
fn extractor_message(output: &ToolOutput) -> String {
    let error_line = output
        .stderr
        .lines()
        .rev()
        .find_map(|l| l.trim().strip_prefix("ERROR:"))
        .map(|l| l.trim().to_string());

    match error_line {
        Some(line) => line,
        None => {
            let tail = output.stderr_tail(2);
            if tail.is_empty() {
                format!("yt-dlp exited with status: {}", output.status)
            } else {
                tail
            }
        }
    }
}

/// Parse a `yt-dlp -J` dump of a single video.
pub fn parse_media(json: &str, requested_url: &str) -> Result<MediaInfo> {
    let raw: RawMedia = serde_json::from_str(json)?;

    let streams: Vec<StreamCandidate> = raw.formats.into_iter().filter_map(to_candidate).collect();

    tracing::debug!(
        "{} usable streams for {} ({})",
        streams.len(),
        raw.id,
        requested_url
    );

    Ok(MediaInfo {
        title: raw.title.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        url: raw
            .webpage_url
            .unwrap_or_else(|| requested_url.to_string()),
        thumbnail_url: raw.thumbnail,
        streams,
    })
}

/// Parse a `yt-dlp -J --flat-playlist` dump.
pub fn parse_playlist(json: &str) -> Result<PlaylistInfo> {
    let raw: RawPlaylist = serde_json::from_str(json)?;

    let entries = raw
        .entries
        .into_iter()
        .filter_map(|e| e.url.or(e.webpage_url))
        .collect();

    Ok(PlaylistInfo {
        title: raw
            .title
            .or(raw.id)
            .unwrap_or_else(|| "playlist".to_string()),
        entries,
    })
}

/// Map a raw format to a candidate, dropping anything not fetchable over HTTP.
fn to_candidate(raw: RawFormat) -> Option<StreamCandidate> {
    let url = raw.url?;
    let protocol = raw.protocol.as_deref().unwrap_or("https");
    if protocol != "https" && protocol != "http" {
        return None;
    }

    let video_codec = codec(raw.vcodec);
    let audio_codec = codec(raw.acodec);
    if video_codec.is_none() && audio_codec.is_none() && raw.height.is_none() {
        return None;
    }

    // Audio-only formats sometimes report a stray frame size.
    let (width, height) = if video_codec.is_none() && audio_codec.is_some() {
        (None, None)
    } else {
        (raw.width, raw.height)
    };

    Some(StreamCandidate {
        id: raw.format_id,
        width,
        height,
        fps: raw.fps,
        video_codec,
        audio_codec,
        container: raw.ext.unwrap_or_else(|| "bin".to_string()),
        bitrate_kbps: raw.tbr,
        audio_bitrate_kbps: raw.abr,
        filesize: raw
            .filesize
            .or(raw.filesize_approx.map(|size| size as u64)),
        url,
        http_headers: raw.http_headers,
    })
}

/// yt-dlp uses the literal `"none"` for an absent track.
fn codec(value: Option<String>) -> Option<String> {
    value.filter(|c| !c.is_empty() && c != "none")
}
