//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::safe_stem;

/// Folder for the entries of a playlist, named after its title.
pub fn playlist_folder(config: &Config, playlist_title: &str) -> PathBuf {
    config
        .options
        .download_directory
        .join(safe_stem(playlist_title))
}

/// Folder for the URLs listed in a links file, named after the file stem.
pub fn file_list_folder(config: &Config, links_file: &Path) -> Result<PathBuf> {
    let stem = links_file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            Error::InvalidPath(format!(
                "Cannot derive a folder name from {}",
                links_file.display()
            ))
        })?;

    Ok(config.options.download_directory.join(safe_stem(stem)))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config() -> Config {
        let mut config = Config::default();
        config.options.download_directory = PathBuf::from("/downloads");
        config
    }

    #[test]
    fn test_playlist_folder() {
        let config = make_test_config();
        assert_eq!(
            playlist_folder(&config, "Lo-fi: beats/chill"),
            PathBuf::from("/downloads/Lo-fi  beats chill")
        );
        assert_eq!(
            playlist_folder(&config, "../.."),
            PathBuf::from("/downloads/untitled")
        );
    }

    #[test]
    fn test_file_list_folder() {
        let config = make_test_config();
        assert_eq!(
            file_list_folder(&config, Path::new("lists/music.txt")).unwrap(),
            PathBuf::from("/downloads/music")
        );
        assert_eq!(
            file_list_folder(&config, Path::new("links")).unwrap(),
            PathBuf::from("/downloads/links")
        );
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
