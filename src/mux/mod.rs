//! Output assembly with ffmpeg.
//!
//! Provides:
//! - Muxing video and audio into mp4/mkv, transcoding to mp3
//! - A scoped temporary workspace for intermediate files

pub mod ffmpeg;
pub mod workspace;

pub use ffmpeg::Ffmpeg;
pub use workspace::TempWorkspace;
