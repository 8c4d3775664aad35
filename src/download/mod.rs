//! Download module.
//!
//! This module provides:
//! - The bounded retry driver
//! - Input resolution (videos, playlists, links files)
//! - Streaming HTTP downloads
//! - Video and audio pipelines
//! - Run bookkeeping

pub mod fetch;
pub mod pipeline;
pub mod retry;
pub mod state;
pub mod targets;

pub use pipeline::Downloader;
pub use retry::RetryDriver;
pub use state::RunReport;
pub use targets::{resolve_targets, Targets};
