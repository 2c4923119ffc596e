pub mod catalog;
pub mod config;
pub mod csv_log;
pub mod placer;
pub mod scraper;
pub mod testing;

pub use catalog::{CatalogApi, CatalogError, Movie, MovieListing, Torrent, YtsClient};
pub use config::{
    load_config, load_config_from_str, validate_config, Categorize, Config, ConfigError, Genre,
    Quality, ScraperConfig, ScraperOverrides, SortBy, SortOrder,
};
pub use csv_log::{CsvLogError, CsvLogger, CsvRow};
pub use placer::{PathBuilder, PlacerError, TorrentWriter, WriteOutcome};
pub use scraper::{
    ContinuePrompt, PromptAnswer, RunSummary, ScrapeError, Scraper, StdinPrompt,
};
