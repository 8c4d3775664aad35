//! Stream candidate representation.

use std::collections::BTreeMap;

/// One downloadable rendition of a media item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamCandidate {
    /// Extractor-assigned format ID.
    pub id: String,

    /// Frame width in pixels.
    pub width: Option<u32>,

    /// Frame height in lines.
    pub height: Option<u32>,

    /// Frames per second.
    pub fps: Option<f64>,

    /// Video codec, `None` for audio-only streams.
    pub video_codec: Option<String>,

    /// Audio codec, `None` for video-only streams.
    pub audio_codec: Option<String>,

    /// Container / file extension (without dot).
    pub container: String,

    /// Approximate total bitrate in kbit/s.
    pub bitrate_kbps: Option<f64>,

    /// Approximate audio bitrate in kbit/s.
    pub audio_bitrate_kbps: Option<f64>,

    /// Exact or approximate size in bytes.
    pub filesize: Option<u64>,

    /// Direct download URL.
    pub url: String,

    /// Request headers the host expects when fetching `url`.
    pub http_headers: BTreeMap<String, String>,
}

impl StreamCandidate {
    /// Whether the stream carries a video track.
    pub fn has_video(&self) -> bool {
        self.video_codec.is_some() || self.height.is_some()
    }

    /// Whether the stream carries an audio track.
    pub fn has_audio(&self) -> bool {
        self.audio_codec.is_some()
    }

    /// Video without an embedded audio track; needs muxing.
    pub fn is_video_only(&self) -> bool {
        self.has_video() && !self.has_audio()
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    /// Resolution as platforms label it: the shorter side of the frame.
    ///
    /// A 1080x1920 portrait rendition is `1080p`, same as a 1920x1080 one.
    pub fn resolution(&self) -> Option<u32> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(width.min(height)),
            (_, height) => height,
        }
    }

    /// Human readable resolution such as `1080p`.
    pub fn resolution_label(&self) -> String {
        match self.resolution() {
            Some(height) => format!("{}p", height),
            None => "unknown".to_string(),
        }
    }

    /// Audio bitrate used for ranking audio streams.
    pub fn effective_audio_bitrate(&self) -> f64 {
        self.audio_bitrate_kbps
            .or(self.bitrate_kbps)
            .unwrap_or(0.0)
    }
}

/// Metadata and available streams for one media item.
#[derive(Debug, Clone, Default)]
pub struct MediaInfo {
    /// Extractor ID of the item.
    pub id: String,

    /// Page URL the info was fetched for.
    pub url: String,

    /// Human readable title.
    pub title: String,

    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,

    /// Available renditions.
    pub streams: Vec<StreamCandidate>,
}

/// Title and entry URLs of a playlist.
#[derive(Debug, Clone, Default)]
pub struct PlaylistInfo {
    pub title: String,
    pub entries: Vec<String>,
}
