//! Read-only access to the streams a platform offers for a URL.

use async_trait::async_trait;

use crate::error::Result;
use crate::stream::candidate::{MediaInfo, PlaylistInfo};

/// Something that can list the available streams of a URL.
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Fetch title, thumbnail and stream list of a single media item.
    ///
    /// Unreachable, removed or restricted items yield [`crate::Error::Fetch`].
    async fn fetch_media(&self, url: &str) -> Result<MediaInfo>;

    /// Fetch the title and entry URLs of a playlist.
    async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo>;
}
