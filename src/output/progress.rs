//! Progress indicators for extractor queries and stream downloads.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const DOWNLOAD_TEMPLATE: &str =
    "Downloading... {percent:>3}% [{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} ({eta})";

/// Spinner shown while waiting on a query of unknown length.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Byte progress bar for one stream of known size.
pub fn create_download_bar(total_bytes: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_bytes);
    if let Ok(style) = ProgressStyle::with_template(DOWNLOAD_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
