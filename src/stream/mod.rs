//! Stream discovery and selection.
//!
//! Provides:
//! - Stream candidate and media info types
//! - The [`StreamSource`] capability and its yt-dlp implementation
//! - Best video / audio stream selection

pub mod candidate;
pub mod selector;
pub mod source;
pub mod ytdlp;

pub use candidate::{MediaInfo, PlaylistInfo, StreamCandidate};
pub use selector::{highest_resolution, resolution_ladder, select_audio, select_video};
pub use source::StreamSource;
pub use ytdlp::YtDlpSource;
