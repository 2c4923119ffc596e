//! Writes torrent and cover files without overwriting existing downloads.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::PlacerError;

pub const TORRENT_EXTENSION: &str = "torrent";
pub const IMAGE_EXTENSION: &str = "jpg";

/// Outcome of a single write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The torrent (and cover, if any) was written.
    Written { torrent: PathBuf },
    /// A torrent already exists at the destination; nothing was written.
    AlreadyExists { torrent: PathBuf },
}

/// Writes `<stem>.torrent` and optionally `<stem>.jpg`.
#[derive(Debug, Clone, Default)]
pub struct TorrentWriter;

impl TorrentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Path of the torrent file for a destination stem.
    pub fn torrent_path(stem: &Path) -> PathBuf {
        with_extension(stem, TORRENT_EXTENSION)
    }

    /// Path of the cover image for a destination stem.
    pub fn image_path(stem: &Path) -> PathBuf {
        with_extension(stem, IMAGE_EXTENSION)
    }

    /// Write the torrent, refusing to replace an existing one.
    ///
    /// The torrent is created with `create_new`, so two writers racing for
    /// the same destination cannot both succeed.
    pub async fn write(
        &self,
        stem: &Path,
        torrent: &[u8],
        image: Option<&[u8]>,
    ) -> Result<WriteOutcome, PlacerError> {
        let torrent_path = Self::torrent_path(stem);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&torrent_path)
            .await;

        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Ok(WriteOutcome::AlreadyExists {
                    torrent: torrent_path,
                });
            }
            Err(e) => return Err(PlacerError::write_failed(torrent_path, e)),
        };

        file.write_all(torrent)
            .await
            .map_err(|e| PlacerError::write_failed(torrent_path.clone(), e))?;
        file.flush()
            .await
            .map_err(|e| PlacerError::write_failed(torrent_path.clone(), e))?;

        if let Some(image) = image {
            let image_path = Self::image_path(stem);
            fs::write(&image_path, image)
                .await
                .map_err(|e| PlacerError::write_failed(image_path, e))?;
        }

        Ok(WriteOutcome::Written {
            torrent: torrent_path,
        })
    }
}

/// Append an extension without replacing dots already in the stem,
/// e.g. "Mr. Nobody (2009) 1080p" keeps its full name.
fn with_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
