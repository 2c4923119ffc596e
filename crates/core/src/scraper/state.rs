//! Mutable state of one scraping run.

use std::collections::HashSet;

use serde::Serialize;

/// Consecutive already-existing files tolerated before asking the user.
pub const EXISTING_FILE_THRESHOLD: u32 = 10;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Movies remaining after the starting-page adjustment.
    pub movie_count: i64,
    /// Listing pages fetched.
    pub pages_fetched: u32,
    /// Movies taken off listing pages.
    pub movies_seen: u64,
    /// Torrent variants that were downloaded or logged.
    pub completed: u64,
    /// Torrent files written (one per genre placement).
    pub files_written: u64,
    /// Placements skipped because the torrent already existed.
    pub skipped_existing: u64,
    pub csv_rows: u64,
}

/// State shared by every task of a run. Lives behind the scraper's mutex.
#[derive(Debug, Default)]
pub struct RunState {
    downloaded: HashSet<u64>,
    // movies a worker is currently processing
    in_flight: HashSet<u64>,
    existing_file_counter: u32,
    skip_prompt: bool,
    pub summary: RunSummary,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `movie_id` for the calling worker.
    ///
    /// Returns `false` when the movie was already downloaded or another
    /// worker holds it; the caller must then leave the movie alone.
    pub fn try_claim(&mut self, movie_id: u64) -> bool {
        !self.downloaded.contains(&movie_id) && self.in_flight.insert(movie_id)
    }

    /// Drop the reservation taken by `try_claim`.
    pub fn release(&mut self, movie_id: u64) {
        self.in_flight.remove(&movie_id);
    }

    /// Whether the next write has to wait for the user.
    pub fn needs_prompt(&self) -> bool {
        !self.skip_prompt && self.existing_file_counter > EXISTING_FILE_THRESHOLD
    }

    pub fn existing_file_counter(&self) -> u32 {
        self.existing_file_counter
    }

    /// A file was freshly written for `movie_id`.
    pub fn record_written(&mut self, movie_id: u64) {
        self.downloaded.insert(movie_id);
        self.existing_file_counter = 0;
        self.summary.files_written += 1;
    }

    /// A placement was skipped because its file already existed.
    pub fn record_existing(&mut self) {
        self.existing_file_counter += 1;
        self.summary.skipped_existing += 1;
    }

    /// The user chose to keep going past the prompt.
    pub fn resume(&mut self) {
        self.existing_file_counter = 0;
        self.skip_prompt = true;
    }

    pub fn downloaded_count(&self) -> usize {
        self.downloaded.len()
    }
}
