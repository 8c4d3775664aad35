//! Turning an input mode into a list of URLs and a target directory.

use std::path::{Path, PathBuf};

use crate::config::{validate_url, Config, InputMode};
use crate::error::{Error, Result};
use crate::fs::{file_list_folder, playlist_folder};
use crate::stream::StreamSource;

/// URLs to download and where to put them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub urls: Vec<String>,
    pub directory: PathBuf,
}

/// Resolve `mode` into concrete targets.
///
/// Playlists are expanded through `source`; links files are read line by
/// line, skipping blank lines and `#` comments.
pub async fn resolve_targets(
    mode: &InputMode,
    source: &dyn StreamSource,
    config: &Config,
) -> Result<Targets> {
    match mode {
        InputMode::Videos(urls) => Ok(Targets {
            urls: urls.iter().map(|u| u.trim().to_string()).collect(),
            directory: config.options.download_directory.clone(),
        }),
        InputMode::Playlist(url) => {
            validate_url(url)?;
            tracing::info!("Fetching playlist {}...", url);
            let playlist = source.fetch_playlist(url).await?;
            tracing::info!(
                "Playlist '{}' has {} entries",
                playlist.title,
                playlist.entries.len()
            );
            Ok(Targets {
                urls: playlist.entries,
                directory: playlist_folder(config, &playlist.title),
            })
        }
        InputMode::File(path) => Ok(Targets {
            urls: read_links_file(path)?,
            directory: file_list_folder(config, path)?,
        }),
    }
}

/// Read a newline-delimited list of URLs.
pub fn read_links_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::Config(format!("Links file not found: {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    Ok(parse_links(&content))
}

fn parse_links(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{MediaInfo, PlaylistInfo};
    use async_trait::async_trait;

    struct PlaylistSource;

    #[async_trait]
    impl StreamSource for PlaylistSource {
        fn name(&self) -> &str {
            "playlist"
        }

        async fn fetch_media(&self, url: &str) -> Result<MediaInfo> {
            Err(Error::Fetch {
                url: url.to_string(),
                message: "unexpected".to_string(),
            })
        }

        async fn fetch_playlist(&self, _url: &str) -> Result<PlaylistInfo> {
            Ok(PlaylistInfo {
                title: "Road trip: 2024".to_string(),
                entries: vec!["https://v/1".to_string(), "https://v/2".to_string()],
            })
        }
    }

    fn config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.options.download_directory = dir.to_path_buf();
        config
    }

    #[test]
    fn test_parse_links() {
        let content = "https://a\n\n  https://b  \r\n# comment\nhttps://c";
        assert_eq!(parse_links(content), vec!["https://a", "https://b", "https://c"]);
    }

    #[tokio::test]
    async fn test_videos_mode() {
        let config = config(Path::new("/dl"));
        let mode = InputMode::Videos(vec!["https://v/1 ".to_string()]);
        let targets = resolve_targets(&mode, &PlaylistSource, &config).await.unwrap();
        assert_eq!(targets.urls, vec!["https://v/1"]);
        assert_eq!(targets.directory, PathBuf::from("/dl"));
    }

    #[tokio::test]
    async fn test_playlist_mode() {
        let config = config(Path::new("/dl"));
        let mode = InputMode::Playlist("https://example.com/playlist?list=PL1".to_string());
        let targets = resolve_targets(&mode, &PlaylistSource, &config).await.unwrap();
        assert_eq!(targets.urls.len(), 2);
        assert_eq!(targets.directory, PathBuf::from("/dl/Road trip  2024"));
    }

    #[tokio::test]
    async fn test_playlist_mode_rejects_bad_url() {
        let config = config(Path::new("/dl"));
        let mode = InputMode::Playlist("not-a-url".to_string());
        assert!(resolve_targets(&mode, &PlaylistSource, &config).await.is_err());
    }

    #[tokio::test]
    async fn test_file_mode() {
        let dir = tempfile::tempdir().unwrap();
        let links = dir.path().join("favourites.txt");
        std::fs::write(&links, "https://v/1\nhttps://v/2\n").unwrap();

        let config = config(Path::new("/dl"));
        let targets = resolve_targets(&InputMode::File(links), &PlaylistSource, &config)
            .await
            .unwrap();

        assert_eq!(targets.urls, vec!["https://v/1", "https://v/2"]);
        assert_eq!(targets.directory, PathBuf::from("/dl/favourites"));
    }

    #[tokio::test]
    async fn test_file_mode_missing_file() {
        let config = config(Path::new("/dl"));
        let mode = InputMode::File(PathBuf::from("/nonexistent/links.txt"));
        assert!(matches!(
            resolve_targets(&mode, &PlaylistSource, &config).await,
            Err(Error::Config(_))
        ));
    }
}
