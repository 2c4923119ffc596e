//! The scraping run: count, paginate, filter, download.

mod pages;
mod prompt;
mod runner;
mod state;

pub use pages::{page_count, page_range, remaining_count};
pub use prompt::{ContinuePrompt, PromptAnswer, StdinPrompt};
pub use runner::{default_workers, CountResult, Scraper};
pub use state::{RunState, RunSummary, EXISTING_FILE_THRESHOLD};

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::csv_log::CsvLogError;
use crate::placer::PlacerError;

/// Errors that end a scraping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to determine the number of movies")]
    Count(#[source] CatalogError),

    #[error("Failed to fetch listing page {page}")]
    Page {
        page: u32,
        #[source]
        source: CatalogError,
    },

    #[error("Failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: CatalogError,
    },

    #[error(transparent)]
    Placer(#[from] PlacerError),

    #[error(transparent)]
    Csv(#[from] CsvLogError),

    #[error("Could not read an answer from the terminal")]
    Prompt(#[source] std::io::Error),

    /// The user declined to continue at the existing-file prompt.
    #[error("Download stopped by user")]
    Aborted,
}

impl ScrapeError {
    /// Whether the run ended on the user's request rather than a failure.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
