//! Streaming HTTP downloads of selected streams and thumbnails.
//!
//! Streams of known size are fetched in sequential `Range` requests of
//! [`DEFAULT_CHUNK_SIZE`] bytes, with the per-format request headers the
//! extractor reported. Hosts throttle or reject single full-length pulls.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{header, Client, Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::output::create_download_bar;
use crate::stream::StreamCandidate;

/// Fallback thumbnail extension.
const DEFAULT_THUMBNAIL_EXT: &str = "jpg";

/// Bytes requested per ranged GET.
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Build the HTTP client used for stream downloads.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))
}

/// Download `stream` to `output_path`, returning the number of bytes written.
pub async fn download_stream(
    client: &Client,
    stream: &StreamCandidate,
    output_path: &Path,
    show_progress: bool,
) -> Result<u64> {
    download_stream_chunked(client, stream, output_path, show_progress, DEFAULT_CHUNK_SIZE).await
}

async fn download_stream_chunked(
    client: &Client,
    stream: &StreamCandidate,
    output_path: &Path,
    show_progress: bool,
    chunk_size: u64,
) -> Result<u64> {
    let headers = request_headers(stream);
    let mut file = File::create(output_path).await?;

    let downloaded = if stream.filesize.is_some() {
        fetch_ranges(client, &stream.url, &headers, &mut file, show_progress, chunk_size).await?
    } else {
        let response = checked(client.get(&stream.url).headers(headers).send().await?)?;
        fetch_whole(response, &mut file, show_progress).await?
    };

    file.flush().await?;
    Ok(downloaded)
}

/// Fetch `url` chunk by chunk until the total from `Content-Range` is reached.
async fn fetch_ranges(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
    file: &mut File,
    show_progress: bool,
    chunk_size: u64,
) -> Result<u64> {
    let mut position: u64 = 0;
    let mut total: Option<u64> = None;
    let mut progress: Option<ProgressBar> = None;

    loop {
        let range = format!("bytes={}-{}", position, position + chunk_size - 1);
        let response = client
            .get(url)
            .headers(headers.clone())
            .header(header::RANGE, range)
            .send()
            .await?;
        let response = checked(response)?;

        if response.status() != StatusCode::PARTIAL_CONTENT {
            if position > 0 {
                return Err(Error::Download(
                    "Server stopped honouring range requests".to_string(),
                ));
            }
            // Range ignored; the body is the whole stream.
            return fetch_whole(response, file, show_progress).await;
        }

        if total.is_none() {
            total = content_range_total(response.headers());
            progress = match total {
                Some(total) if show_progress => Some(create_download_bar(total)),
                _ => None,
            };
        }

        let before = position;
        position = write_body(response, file, position, progress.as_ref()).await?;

        let finished = match total {
            Some(total) => position >= total,
            None => position - before < chunk_size,
        };
        if finished || position == before {
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Some(expected) = total {
        check_complete(position, expected)?;
    }

    Ok(position)
}

/// Write an unranged response body to `file`.
async fn fetch_whole(response: Response, file: &mut File, show_progress: bool) -> Result<u64> {
    let content_length = response.content_length();

    let progress = match content_length {
        Some(total) if show_progress => Some(create_download_bar(total)),
        _ => None,
    };

    let downloaded = write_body(response, file, 0, progress.as_ref()).await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Some(expected) = content_length {
        check_complete(downloaded, expected)?;
    }

    Ok(downloaded)
}

/// Append a response body to `file`, returning the new position.
async fn write_body(
    response: Response,
    file: &mut File,
    mut position: u64,
    progress: Option<&ProgressBar>,
) -> Result<u64> {
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        position += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(position);
        }
    }

    Ok(position)
}

fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download(format!("HTTP {} for stream", status)));
    }
    Ok(response)
}

fn check_complete(downloaded: u64, expected: u64) -> Result<()> {
    if downloaded != expected {
        return Err(Error::Download(format!(
            "Incomplete download: {} of {} bytes",
            downloaded, expected
        )));
    }
    Ok(())
}

/// Total length from a `Content-Range: bytes a-b/total` header.
fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_RANGE)?
        .to_str()
        .ok()?
        .rsplit('/')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Per-format headers as a [`HeaderMap`]; unusable entries are skipped.
fn request_headers(stream: &StreamCandidate) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in &stream.http_headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::debug!("Skipping invalid request header '{}'", name),
        }
    }

    headers
}

/// Download a thumbnail into `dir` as `thumb.<ext>`.
///
/// The extension follows the response Content-Type.
pub async fn download_thumbnail(client: &Client, url: &str, dir: &Path) -> Result<PathBuf> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download(format!("HTTP {} for thumbnail", status)));
    }

    let extension = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(extension_for_mime)
        .unwrap_or(DEFAULT_THUMBNAIL_EXT);

    let bytes = response.bytes().await?;
    let path = dir.join(format!("thumb.{}", extension));
    tokio::fs::write(&path, &bytes).await?;

    Ok(path)
}

/// Preferred file extension for a MIME type.
fn extension_for_mime(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or("").trim();

    match essence {
        "image/jpeg" => "jpg",
        _ => mime_guess::get_mime_extensions_str(essence)
            .and_then(|exts| exts.first().copied())
            .unwrap_or(DEFAULT_THUMBNAIL_EXT),
    }
}
