//! Muxing and transcoding with ffmpeg.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::process::run_tool;

/// Lines of ffmpeg stderr kept in error messages.
const STDERR_TAIL_LINES: usize = 3;

/// Handle to the ffmpeg binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    path: PathBuf,
}

impl Ffmpeg {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tools.ffmpeg_path.clone())
    }

    /// Combine a video-only and an audio-only file into `output`.
    ///
    /// For mp4 the audio is re-encoded to AAC and `thumbnail`, if given, is
    /// attached as cover art. For mkv both streams are copied as-is.
    pub async fn mux(
        &self,
        video: &Path,
        audio: &Path,
        thumbnail: Option<&Path>,
        output: &Path,
        format: OutputFormat,
    ) -> Result<()> {
        tracing::info!("Merging video and audio using ffmpeg...");
        let args = mux_args(video, audio, thumbnail, output, format)?;
        self.run(args).await
    }

    /// Transcode an audio file to mp3.
    pub async fn transcode_audio(&self, input: &Path, output: &Path) -> Result<()> {
        tracing::info!("Converting audio to mp3 using ffmpeg...");
        self.run(transcode_args(input, output)).await
    }

    async fn run(&self, args: Vec<OsString>) -> Result<()> {
        let output = run_tool(&self.path, &args, None).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FFmpegNotFound
            } else {
                Error::FFmpeg(format!("Failed to run ffmpeg: {}", e))
            }
        })?;

        if !output.success() {
            let detail = output.stderr_tail(STDERR_TAIL_LINES);
            return Err(Error::FFmpeg(if detail.is_empty() {
                format!("ffmpeg exited with status: {}", output.status)
            } else {
                format!("ffmpeg exited with status: {} ({})", output.status, detail)
            }));
        }

        Ok(())
    }
}

fn base_args() -> Vec<OsString> {
    ["-hide_banner", "-nostdin", "-loglevel", "warning", "-y"]
        .iter()
        .map(OsString::from)
        .collect()
}

/// Build the argument list for muxing into `format`.
pub fn mux_args(
    video: &Path,
    audio: &Path,
    thumbnail: Option<&Path>,
    output: &Path,
    format: OutputFormat,
) -> Result<Vec<OsString>> {
    let mut args = base_args();
    args.extend([
        "-i".into(),
        video.as_os_str().to_owned(),
        "-i".into(),
        audio.as_os_str().to_owned(),
    ]);

    match (format, thumbnail) {
        (OutputFormat::Mp4, Some(thumb)) => {
            args.extend(["-i".into(), thumb.as_os_str().to_owned()]);
            args.extend(
                [
                    "-map", "0:v:0", "-map", "1:a:0", "-map", "2:0",
                    "-c:v:0", "copy", "-c:v:1", "mjpeg", "-c:a", "aac",
                    "-disposition:v:1", "attached_pic",
                ]
                .iter()
                .map(OsString::from),
            );
        }
        (OutputFormat::Mp4, None) => {
            args.extend(
                ["-map", "0:v:0", "-map", "1:a:0", "-c:v", "copy", "-c:a", "aac"]
                    .iter()
                    .map(OsString::from),
            );
        }
        (OutputFormat::Mkv, _) => {
            args.extend(
                ["-map", "0:v:0", "-map", "1:a:0", "-c", "copy"]
                    .iter()
                    .map(OsString::from),
            );
        }
        (OutputFormat::Mp3, _) => {
            return Err(Error::FFmpeg(
                "mp3 output carries no video; use transcode_audio".into(),
            ))
        }
    }

    args.push(output.as_os_str().to_owned());
    Ok(args)
}

/// Build the argument list for an mp3 transcode.
pub fn transcode_args(input: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-i".into(),
        input.as_os_str().to_owned(),
        "-vn".into(),
        "-acodec".into(),
        "libmp3lame".into(),
        output.as_os_str().to_owned(),
    ]);
    args
}
