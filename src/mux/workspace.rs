//! Scoped temporary directory for intermediate media files.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Prefix of temporary workspace directories.
pub const WORKSPACE_PREFIX: &str = ".snapper_tmp_";

/// A uniquely named directory that is removed when dropped.
///
/// Downloaded streams, thumbnails and the unfinished ffmpeg output live here
/// until the final file is moved into place, so an early return or error
/// anywhere in the pipeline leaves nothing behind.
#[derive(Debug)]
pub struct TempWorkspace {
    path: PathBuf,
}

impl TempWorkspace {
    /// Create a fresh workspace inside `parent`.
    pub async fn create(parent: &Path) -> Result<Self> {
        let path = parent.join(format!("{}{}", WORKSPACE_PREFIX, uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        tracing::debug!("Created workspace {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!("Removed workspace {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove temporary files in {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
