//! Fetch, filter and download pass over the catalog listing.
//!
//! The run is strictly page by page. Within a page, movies are processed
//! either one after another or through a worker pool whose width is fixed
//! for the whole run. Shared counters live in one `RunState` behind a mutex.
//!
//! The existing-file prompt is a checkpoint: in sequential mode it runs right
//! before the pending write, in concurrent mode a task that reaches the
//! threshold parks its remaining writes, the page is drained, and the parked
//! writes are replayed sequentially through the same checkpoint.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::pages::{page_range, remaining_count};
use super::prompt::{ContinuePrompt, PromptAnswer};
use super::state::{RunState, RunSummary};
use super::ScrapeError;
use crate::catalog::{CatalogApi, ListingQuery, Movie};
use crate::config::ScraperConfig;
use crate::csv_log::{CsvLogger, CsvRow};
use crate::placer::{
    sanitize_name, PathBuilder, PlacementRequest, PlacerError, TorrentWriter, WriteOutcome,
};

/// Upper bound on the worker pool width.
const MAX_WORKERS: usize = 32;

/// Result of the initial count request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountResult {
    /// Total reported by the catalog.
    pub movie_count: i64,
    /// Movies left from the starting page on.
    pub remaining: i64,
    /// Listing URL ending in `page=`.
    pub listing_url: String,
}

/// Torrent bytes of one variant and the destinations still to write.
struct PendingVariant {
    movie_id: u64,
    name: String,
    quality: String,
    stems: Vec<PathBuf>,
    torrent: Arc<Vec<u8>>,
    image: Option<Arc<Vec<u8>>>,
    reported: bool,
}

type ParkedWrites = StdMutex<Vec<PendingVariant>>;

/// Drives one scraping run.
pub struct Scraper {
    config: ScraperConfig,
    catalog: Arc<dyn CatalogApi>,
    prompt: Arc<dyn ContinuePrompt>,
    paths: PathBuilder,
    writer: TorrentWriter,
    csv: Option<CsvLogger>,
    state: Mutex<RunState>,
    progress: ProgressBar,
    workers: usize,
}

impl Scraper {
    /// Create a scraper for one run.
    pub fn new(
        config: ScraperConfig,
        catalog: Arc<dyn CatalogApi>,
        prompt: Arc<dyn ContinuePrompt>,
    ) -> Self {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} Downloading [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} Files ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let csv = config
            .csv_enabled()
            .then(|| CsvLogger::new(config.csv_path.clone()));

        Self {
            paths: PathBuilder::new(&config),
            writer: TorrentWriter::new(),
            csv,
            state: Mutex::new(RunState::new()),
            progress,
            workers: default_workers(),
            config,
            catalog,
            prompt,
        }
    }

    /// Do not draw the progress bar or per-file notices.
    pub fn with_hidden_progress(self) -> Self {
        self.progress.set_draw_target(ProgressDrawTarget::hidden());
        self
    }

    /// Width of the worker pool used in concurrent mode.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Counters collected so far.
    pub async fn summary(&self) -> RunSummary {
        self.state.lock().await.summary.clone()
    }

    /// Run the whole pass: count, then every page.
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        if !self.config.csv_only {
            let root = self.paths.root().to_path_buf();
            fs::create_dir_all(&root)
                .await
                .map_err(|e| PlacerError::DirectoryCreationFailed {
                    path: root.clone(),
                    source: e,
                })?;
        }

        let count = self.determine_count().await?;
        self.state.lock().await.summary.movie_count = count.remaining;
        self.log_keys();

        if count.remaining <= 0 {
            info!("Could not find any movies with the given keywords");
            return Ok(self.summary().await);
        }
        info!("Found {} movies. Starting download ...", count.remaining);

        if let Err(e) = self.download_pages(&count).await {
            self.progress.abandon();
            return Err(e);
        }
        self.progress.finish();

        let (summary, movies) = {
            let state = self.state.lock().await;
            (state.summary.clone(), state.downloaded_count())
        };
        info!(
            "Download finished: {} completed, {} files written for {} movies, {} already existed, {} CSV rows",
            summary.completed, summary.files_written, movies, summary.skipped_existing, summary.csv_rows
        );
        Ok(summary)
    }

    /// Ask the catalog how many movies match and build the listing URL.
    pub async fn determine_count(&self) -> Result<CountResult, ScrapeError> {
        let listing_url =
            ListingQuery::from_config(&self.config).url_prefix(self.catalog.base_url());

        let listing = self
            .catalog
            .fetch_listing(&listing_url)
            .await
            .map_err(ScrapeError::Count)?;

        let remaining = remaining_count(listing.movie_count, self.config.page);
        debug!(
            "Catalog reports {} movies, {} from page {}",
            listing.movie_count, remaining, self.config.page
        );

        Ok(CountResult {
            movie_count: listing.movie_count,
            remaining,
            listing_url,
        })
    }

    fn log_keys(&self) {
        let config = &self.config;
        info!("Initializing download with these keys:");
        info!("  Folder: {}", self.paths.root().display());
        info!("  Quality: {}", config.quality);
        info!("  Genre: {}", config.genre);
        info!("  Min rating: {}", config.minimum_rating);
        info!("  Categorization: {}", config.categorize);
        info!("  Page: {}", config.page);
        info!("  Cover: {}", config.poster);
        info!("  IMDb: {}", config.imdb_id);
        info!(
            "  Multi-threading: {}{}",
            config.concurrent,
            if config.concurrent {
                format!(" ({} workers)", self.workers())
            } else {
                String::new()
            }
        );
        if let Some(csv) = &self.csv {
            info!("  CSV log: {}", csv.path().display());
        }
    }

    async fn download_pages(&self, count: &CountResult) -> Result<(), ScrapeError> {
        self.progress.set_length(count.remaining.max(0) as u64);

        for page in page_range(self.config.page, count.remaining) {
            let url = format!("{}{}", count.listing_url, page);
            let listing = self
                .catalog
                .fetch_listing(&url)
                .await
                .map_err(|source| ScrapeError::Page { page, source })?;

            {
                let mut state = self.state.lock().await;
                state.summary.pages_fetched += 1;
                state.summary.movies_seen += listing.movies.len() as u64;
            }

            if listing.movies.is_empty() {
                self.progress
                    .println(format!("Could not find any torrents on page {}", page));
                continue;
            }

            if self.config.concurrent {
                self.process_page_concurrently(&listing.movies).await?;
            } else {
                for movie in &listing.movies {
                    self.process_movie(movie, None).await?;
                }
            }
        }

        Ok(())
    }

    async fn process_page_concurrently(&self, movies: &[Movie]) -> Result<(), ScrapeError> {
        let parked: ParkedWrites = StdMutex::new(Vec::new());

        let results: Vec<Result<(), ScrapeError>> = stream::iter(movies)
            .map(|movie| self.process_movie(movie, Some(&parked)))
            .buffer_unordered(self.workers)
            .collect()
            .await;
        results.into_iter().collect::<Result<(), _>>()?;

        let parked = parked.into_inner().unwrap_or_else(PoisonError::into_inner);
        if !parked.is_empty() {
            debug!("{} torrents waited for the existing-file prompt", parked.len());
        }
        for variant in parked {
            self.place_variant(variant, None).await?;
        }

        Ok(())
    }

    /// Filter one movie and download (or log) its matching torrents.
    async fn process_movie(
        &self,
        movie: &Movie,
        parked: Option<&ParkedWrites>,
    ) -> Result<(), ScrapeError> {
        if movie.year < self.config.year_limit {
            debug!(
                "Skipping {}: {} is before {}",
                movie.title, movie.year, self.config.year_limit
            );
            return Ok(());
        }

        if !self.state.lock().await.try_claim(movie.id) {
            debug!("Skipping {}: already handled this run", movie.title);
            return Ok(());
        }

        let result = self.download_movie(movie, parked).await;
        self.state.lock().await.release(movie.id);
        result
    }

    async fn download_movie(
        &self,
        movie: &Movie,
        parked: Option<&ParkedWrites>,
    ) -> Result<(), ScrapeError> {
        if movie.torrents.is_empty() {
            warn!("No torrents for {} (id {})", movie.title, movie.id);
            self.progress.println(format!(
                "Could not find any torrents for {}. Skipping ...",
                movie.display_title()
            ));
            return Ok(());
        }

        let name = sanitize_name(movie.display_title());
        let image = self.fetch_cover(movie).await?;

        for torrent in movie
            .torrents
            .iter()
            .filter(|t| self.config.quality.matches(&t.quality))
        {
            if let Some(csv) = &self.csv {
                csv.log(&CsvRow::new(movie, torrent)).await?;
                self.state.lock().await.summary.csv_rows += 1;
            }

            if self.config.csv_only {
                self.report("Logged", &name, &torrent.quality).await;
                continue;
            }

            let bytes = self.fetch(&torrent.url).await?;

            let genres: Vec<Option<&str>> = if self.config.categorize.is_genre_aware() {
                movie.genre_tags().into_iter().map(Some).collect()
            } else {
                vec![None]
            };

            let mut stems = Vec::with_capacity(genres.len());
            for genre in genres {
                let request = PlacementRequest {
                    name: &name,
                    rating: movie.rating,
                    quality: &torrent.quality,
                    genre,
                    imdb_code: &movie.imdb_code,
                };
                if let Some(stem) = self.paths.prepare(&request).await? {
                    stems.push(stem);
                }
            }

            let variant = PendingVariant {
                movie_id: movie.id,
                name: name.clone(),
                quality: torrent.quality.clone(),
                stems,
                torrent: Arc::new(bytes),
                image: image.clone(),
                reported: false,
            };
            self.place_variant(variant, parked).await?;
        }

        Ok(())
    }

    async fn fetch_cover(&self, movie: &Movie) -> Result<Option<Arc<Vec<u8>>>, ScrapeError> {
        if !self.config.poster || self.config.csv_only {
            return Ok(None);
        }

        match &movie.large_cover_image {
            Some(url) => Ok(Some(Arc::new(self.fetch(url).await?))),
            None => {
                warn!("No cover image for {} (id {})", movie.title, movie.id);
                Ok(None)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        self.catalog
            .fetch_bytes(url)
            .await
            .map_err(|source| ScrapeError::Download {
                url: url.to_string(),
                source,
            })
    }

    /// Write every destination of a variant, stopping at the checkpoint.
    ///
    /// With `parked` set the checkpoint is not run here: the remaining
    /// destinations are queued for after the page has drained.
    async fn place_variant(
        &self,
        mut variant: PendingVariant,
        parked: Option<&ParkedWrites>,
    ) -> Result<(), ScrapeError> {
        let mut stems = std::mem::take(&mut variant.stems).into_iter();

        while let Some(stem) = stems.next() {
            let needs_prompt = self.state.lock().await.needs_prompt();
            if needs_prompt {
                match parked {
                    Some(queue) => {
                        variant.stems = std::iter::once(stem).chain(stems).collect();
                        queue
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(variant);
                        return Ok(());
                    }
                    None => self.checkpoint().await?,
                }
            }

            let outcome = self
                .writer
                .write(
                    &stem,
                    variant.torrent.as_slice(),
                    variant.image.as_deref().map(Vec::as_slice),
                )
                .await?;

            if self.record(&variant, outcome).await && !variant.reported {
                variant.reported = true;
                self.report("Downloaded", &variant.name, &variant.quality)
                    .await;
            }
        }

        Ok(())
    }

    /// Ask the user whether to continue once too many files already existed.
    async fn checkpoint(&self) -> Result<(), ScrapeError> {
        let mut state = self.state.lock().await;
        if !state.needs_prompt() {
            return Ok(());
        }

        let question = format!(
            "Found {} existing files in a row. Do you want to keep downloading? [Y or N]",
            state.existing_file_counter()
        );
        self.progress
            .suspend(|| self.prompt.show(&question))
            .map_err(ScrapeError::Prompt)?;
        let answer = self.prompt.answer().await.map_err(ScrapeError::Prompt)?;

        match answer {
            PromptAnswer::Continue => {
                state.resume();
                info!("Continuing; existing files will no longer interrupt this run");
                Ok(())
            }
            PromptAnswer::Abort => Err(ScrapeError::Aborted),
            PromptAnswer::Invalid => {
                self.progress.println("Invalid input. Enter only Y or N");
                Ok(())
            }
        }
    }

    /// Apply a write outcome to the run state. Returns whether a file was written.
    async fn record(&self, variant: &PendingVariant, outcome: WriteOutcome) -> bool {
        let mut state = self.state.lock().await;
        match outcome {
            WriteOutcome::Written { torrent } => {
                debug!("Wrote {}", torrent.display());
                state.record_written(variant.movie_id);
                true
            }
            WriteOutcome::AlreadyExists { torrent } => {
                debug!("Exists {}", torrent.display());
                self.progress.println(format!(
                    "{} - File already exists. Skipping ...",
                    variant.name
                ));
                state.record_existing();
                false
            }
        }
    }

    async fn report(&self, verb: &str, name: &str, quality: &str) {
        self.state.lock().await.summary.completed += 1;
        self.progress.inc(1);
        self.progress
            .println(format!("{} {} {}", verb, name, quality.to_uppercase()));
    }
}

/// Worker pool width: a few more than the core count, capped.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .saturating_add(4)
        .min(MAX_WORKERS)
}
