//! Filesystem module.
//!
//! Provides:
//! - Title sanitization and output file naming
//! - Download directory layout

pub mod naming;
pub mod paths;

pub use naming::{convert_title, output_file_name, safe_stem};
pub use paths::{ensure_dir, file_list_folder, playlist_folder};
