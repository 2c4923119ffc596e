//! Append-only CSV log of scraped torrents.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::catalog::{Movie, Torrent};

#[derive(Debug, Error)]
pub enum CsvLogError {
    #[error("Failed to open CSV log {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode CSV row: {0}")]
    Encode(#[from] csv::Error),

    #[error("Failed to append to CSV log: {0}")]
    Append(#[from] std::io::Error),
}

/// One logged torrent. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "YTS ID")]
    pub yts_id: u64,
    #[serde(rename = "IMDB ID")]
    pub imdb_id: String,
    #[serde(rename = "Movie Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Quality")]
    pub quality: String,
    #[serde(rename = "YTS URL")]
    pub yts_url: String,
    #[serde(rename = "IMDb URL")]
    pub imdb_url: String,
    #[serde(rename = "Torrent URL")]
    pub torrent_url: String,
}

impl CsvRow {
    pub fn new(movie: &Movie, torrent: &Torrent) -> Self {
        Self {
            yts_id: movie.id,
            imdb_id: movie.imdb_code.clone(),
            title: movie.title.clone(),
            year: movie.year,
            language: movie.language.clone(),
            rating: movie.rating,
            quality: torrent.quality.clone(),
            yts_url: movie.url.clone(),
            imdb_url: movie.imdb_url(),
            torrent_url: torrent.url.clone(),
        }
    }
}

/// Appends rows to a CSV file, writing the header only when the file is new.
#[derive(Debug)]
pub struct CsvLogger {
    path: PathBuf,
    // serializes appends from concurrent workers
    lock: Mutex<()>,
}

impl CsvLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, with the header first when the file does not exist yet.
    pub async fn log(&self, row: &CsvRow) -> Result<(), CsvLogError> {
        let _guard = self.lock.lock().await;

        let existed = fs::try_exists(&self.path).await.unwrap_or(false);
        let mut encoder = WriterBuilder::new()
            .has_headers(!existed)
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());
        encoder.serialize(row)?;
        let encoded = encoder.into_inner().map_err(|e| e.into_error())?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| CsvLogError::Open {
                path: self.path.clone(),
                source: e,
            })?;
        file.write_all(&encoded).await?;
        file.flush().await?;
        Ok(())
    }
}
