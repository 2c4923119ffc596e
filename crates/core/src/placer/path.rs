//! Destination path construction.

use std::path::{Path, PathBuf};

use tokio::fs;

use super::error::PlacerError;
use crate::config::{Categorize, ScraperConfig};

/// Characters that are removed from titles before they are used in paths.
pub const ILLEGAL_PATH_CHARS: &[char] = &['\'', '/', '\\', ':', '*', '?', '<', '>', '|'];

/// Remove characters that are not allowed in file names.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_PATH_CHARS.contains(c))
        .collect()
}

/// Rating bucket directory name: the truncated rating followed by `+`.
pub fn rating_bucket(rating: f64) -> String {
    format!("{}+", rating.trunc() as i64)
}

/// Everything needed to name one placed torrent.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest<'a> {
    /// Sanitized display name.
    pub name: &'a str,
    pub rating: f64,
    pub quality: &'a str,
    /// Genre tag, used by genre-aware schemes only.
    pub genre: Option<&'a str>,
    pub imdb_code: &'a str,
}

/// Builds destination paths under the output root.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    root: PathBuf,
    categorize: Categorize,
    poster: bool,
    imdb_id: bool,
    csv_only: bool,
}

impl PathBuilder {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            root: config.output_dir(),
            categorize: config.categorize,
            poster: config.poster,
            imdb_id: config.imdb_id,
            csv_only: config.csv_only,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a placement goes into. `None` in CSV-only mode.
    pub fn directory(&self, request: &PlacementRequest<'_>) -> Option<PathBuf> {
        if self.csv_only {
            return None;
        }

        let mut dir = self.root.clone();
        let genre = request.genre.unwrap_or("None");

        match self.categorize {
            Categorize::None => {}
            Categorize::Rating => dir.push(rating_bucket(request.rating)),
            Categorize::Genre => dir.push(genre),
            Categorize::RatingGenre => {
                dir.push(rating_bucket(request.rating));
                dir.push(genre);
            }
            Categorize::GenreRating => {
                dir.push(genre);
                dir.push(rating_bucket(request.rating));
            }
        }

        if self.poster {
            dir.push(request.name);
        }

        Some(dir)
    }

    /// File name without extension.
    pub fn file_stem(&self, request: &PlacementRequest<'_>) -> String {
        if self.imdb_id {
            format!("{} {} - {}", request.name, request.quality, request.imdb_code)
        } else {
            format!("{} {}", request.name, request.quality)
        }
    }

    /// Full destination path without extension. `None` in CSV-only mode.
    pub fn target(&self, request: &PlacementRequest<'_>) -> Option<PathBuf> {
        self.directory(request)
            .map(|dir| dir.join(self.file_stem(request)))
    }

    /// Resolve the destination and create its directory tree.
    ///
    /// Performs no I/O and returns `None` in CSV-only mode.
    pub async fn prepare(
        &self,
        request: &PlacementRequest<'_>,
    ) -> Result<Option<PathBuf>, PlacerError> {
        let Some(dir) = self.directory(request) else {
            return Ok(None);
        };

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| PlacerError::DirectoryCreationFailed {
                path: dir.clone(),
                source: e,
            })?;

        Ok(Some(dir.join(self.file_stem(request))))
    }
}
