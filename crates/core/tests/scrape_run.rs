//! End-to-end runs of the scraper against the in-memory catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

use yifi_core::catalog::Movie;
use yifi_core::config::{Categorize, Quality, ScraperConfig};
use yifi_core::scraper::{PromptAnswer, ScrapeError, Scraper};
use yifi_core::testing::{fixtures, MockCatalog, ScriptedPrompt};

struct Run {
    _temp: TempDir,
    root: PathBuf,
    catalog: Arc<MockCatalog>,
}

impl Run {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("library");
        Self {
            _temp: temp,
            root,
            catalog: Arc::new(MockCatalog::new()),
        }
    }

    fn config(&self) -> ScraperConfig {
        ScraperConfig {
            output: Some(self.root.clone()),
            csv_path: self.root.with_extension("csv"),
            ..Default::default()
        }
    }

    fn scraper(&self, config: ScraperConfig, prompt: Arc<ScriptedPrompt>) -> Scraper {
        Scraper::new(config, self.catalog.clone(), prompt).with_hidden_progress()
    }

    fn torrent(&self, dir: &str, stem: &str) -> PathBuf {
        self.root.join(dir).join(format!("{}.torrent", stem))
    }

    /// Pre-create the torrent file a movie would be written to.
    fn existing(&self, dir: &str, stem: &str) {
        let path = self.torrent(dir, stem);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"old").unwrap();
    }
}

fn numbered(range: std::ops::RangeInclusive<u64>) -> Vec<Movie> {
    range
        .map(|i| fixtures::movie(i, &format!("Movie {}", i), 2001, 7.2, &["Drama"], &["1080p"]))
        .collect()
}

fn stem(i: u64) -> String {
    format!("Movie {} (2001) 1080p", i)
}

fn count_files(dir: &Path, extension: &str) -> usize {
    let mut count = 0;
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += count_files(&path, extension);
        } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            count += 1;
        }
    }
    count
}

// =========================================================================
// Existing-file prompt
// =========================================================================

/// Eleven existing torrents followed by one new one, all on page 1.
async fn eleven_existing_then_new(run: &Run) {
    run.catalog.set_page(1, numbered(1..=12)).await;
    for i in 1..=11 {
        run.existing("7+", &stem(i));
    }
}

#[tokio::test]
async fn test_prompt_abort_leaves_pending_file_unwritten() {
    let run = Run::new();
    eleven_existing_then_new(&run).await;
    let prompt = Arc::new(ScriptedPrompt::new(vec![PromptAnswer::Abort]));

    let scraper = run.scraper(run.config(), prompt.clone());
    let err = assert_err!(scraper.run().await);

    assert!(matches!(err, ScrapeError::Aborted));
    assert!(err.is_user_abort());
    assert_eq!(prompt.asked(), 1);
    assert!(prompt.questions()[0].contains("11"));
    assert!(!run.torrent("7+", &stem(12)).exists());

    let summary = scraper.summary().await;
    assert_eq!(summary.skipped_existing, 11);
    assert_eq!(summary.files_written, 0);
}

#[tokio::test]
async fn test_prompt_continue_suppresses_further_prompts() {
    let run = Run::new();
    run.catalog.set_page(1, numbered(1..=30)).await;
    for i in (1..=11).chain(13..=30) {
        run.existing("7+", &stem(i));
    }
    let prompt = Arc::new(ScriptedPrompt::new(vec![PromptAnswer::Continue]));

    let summary = assert_ok!(run.scraper(run.config(), prompt.clone()).run().await);

    assert_eq!(prompt.asked(), 1);
    assert!(run.torrent("7+", &stem(12)).is_file());
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.skipped_existing, 29);
}

#[tokio::test]
async fn test_invalid_answer_lets_write_proceed() {
    let run = Run::new();
    eleven_existing_then_new(&run).await;
    let prompt = Arc::new(ScriptedPrompt::new(vec![PromptAnswer::Invalid]));

    let summary = assert_ok!(run.scraper(run.config(), prompt.clone()).run().await);

    assert_eq!(prompt.asked(), 1);
    assert_eq!(summary.files_written, 1);
    assert!(run.torrent("7+", &stem(12)).is_file());
}

#[tokio::test]
async fn test_ten_existing_files_do_not_prompt() {
    let run = Run::new();
    run.catalog.set_page(1, numbered(1..=11)).await;
    for i in 1..=10 {
        run.existing("7+", &stem(i));
    }
    // no scripted answers: asking would fail the run
    let prompt = Arc::new(ScriptedPrompt::new(vec![]));

    let summary = assert_ok!(run.scraper(run.config(), prompt.clone()).run().await);

    assert_eq!(prompt.asked(), 0);
    assert_eq!(summary.files_written, 1);
}

#[tokio::test]
async fn test_concurrent_prompt_runs_after_page_drains() {
    let run = Run::new();
    run.catalog.set_movie_count(100).await;
    run.catalog.set_page(1, numbered(1..=11)).await;
    run.catalog.set_page(2, numbered(12..=12)).await;
    for i in 1..=11 {
        run.existing("7+", &stem(i));
    }
    let prompt = Arc::new(ScriptedPrompt::new(vec![PromptAnswer::Abort]));
    let config = ScraperConfig {
        concurrent: true,
        ..run.config()
    };

    let scraper = run.scraper(config, prompt.clone());
    let err = assert_err!(scraper.run().await);

    assert!(err.is_user_abort());
    assert_eq!(prompt.asked(), 1);
    assert!(!run.torrent("7+", &stem(12)).exists());
    assert_eq!(scraper.summary().await.pages_fetched, 2);
}

#[tokio::test]
async fn test_concurrent_prompt_continue_writes_parked_file() {
    let run = Run::new();
    run.catalog.set_movie_count(100).await;
    run.catalog.set_page(1, numbered(1..=11)).await;
    run.catalog.set_page(2, numbered(12..=12)).await;
    for i in 1..=11 {
        run.existing("7+", &stem(i));
    }
    let prompt = Arc::new(ScriptedPrompt::new(vec![PromptAnswer::Continue]));
    let config = ScraperConfig {
        concurrent: true,
        ..run.config()
    };

    let summary = assert_ok!(run.scraper(config, prompt.clone()).run().await);

    assert_eq!(prompt.asked(), 1);
    assert_eq!(summary.files_written, 1);
    assert!(run.torrent("7+", &stem(12)).is_file());
}

// =========================================================================
// Filtering and placement
// =========================================================================

#[tokio::test]
async fn test_nothing_downloaded_before_year_limit() {
    let run = Run::new();
    let movies = (0..10)
        .map(|i| fixtures::movie(i, &format!("Film {}", i), 1995 + i as u32, 6.0, &[], &["1080p"]))
        .collect();
    run.catalog.set_page(1, movies).await;
    let config = ScraperConfig {
        year_limit: 2000,
        concurrent: true,
        ..run.config()
    };

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.files_written, 5);
    for i in 0..5u64 {
        let stem = format!("Film {} ({}) 1080p", i, 1995 + i);
        assert!(!run.torrent("6+", &stem).exists());
    }
}

#[tokio::test]
async fn test_movie_repeated_on_next_page_is_ignored() {
    let run = Run::new();
    let movie = fixtures::movie(7, "Ran", 1985, 8.2, &["Action"], &["1080p"]);
    run.catalog.set_movie_count(100).await;
    run.catalog.set_page(1, vec![movie.clone()]).await;
    run.catalog.set_page(2, vec![movie]).await;

    let summary = assert_ok!(run
        .scraper(run.config(), Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.skipped_existing, 0);
    assert_eq!(run.catalog.byte_requests().await.len(), 1);
}

#[tokio::test]
async fn test_concurrent_duplicate_on_same_page_is_ignored() {
    let run = Run::new();
    let movie = fixtures::movie(5, "Heat", 1995, 8.3, &["Crime"], &["1080p"]);
    run.catalog
        .set_page(1, vec![movie.clone(), movie.clone(), movie])
        .await;
    let config = ScraperConfig {
        concurrent: true,
        ..run.config()
    };

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.completed, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.skipped_existing, 0);
    assert_eq!(run.catalog.byte_requests().await.len(), 1);
}

#[tokio::test]
async fn test_rating_genre_places_under_every_genre() {
    let run = Run::new();
    run.catalog
        .set_page(
            1,
            vec![fixtures::movie(1, "Alien", 1979, 8.5, &["Horror", "Sci-Fi"], &["720p", "1080p"])],
        )
        .await;
    let config = ScraperConfig {
        categorize: Categorize::RatingGenre,
        quality: Quality::All,
        imdb_id: true,
        ..run.config()
    };

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.files_written, 4);
    assert_eq!(summary.completed, 2);
    for genre in ["Horror", "Sci-Fi"] {
        for quality in ["720p", "1080p"] {
            let stem = format!("Alien (1979) {} - tt0000001", quality);
            assert!(run.torrent(&format!("8+/{}", genre), &stem).is_file());
        }
    }
}

#[tokio::test]
async fn test_movie_without_genres_filed_under_none() {
    let run = Run::new();
    run.catalog
        .set_page(1, vec![fixtures::movie(1, "Heat", 1995, 8.3, &[], &["1080p"])])
        .await;
    let config = ScraperConfig {
        categorize: Categorize::GenreRating,
        ..run.config()
    };

    assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert!(run.torrent("None/8+", "Heat (1995) 1080p").is_file());
}

#[tokio::test]
async fn test_titles_are_sanitized() {
    let run = Run::new();
    run.catalog
        .set_page(
            1,
            vec![fixtures::movie(1, "What's Up: Doc?", 1972, 7.7, &[], &["1080p"])],
        )
        .await;

    assert_ok!(run
        .scraper(run.config(), Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert!(run.torrent("7+", "Whats Up Doc (1972) 1080p").is_file());
}

#[tokio::test]
async fn test_csv_only_with_no_categories() {
    let run = Run::new();
    run.catalog
        .set_page(
            1,
            vec![
                fixtures::movie(1, "Heat", 1995, 8.3, &["Crime"], &["720p", "1080p", "2160p"]),
                fixtures::movie(2, "Ran", 1985, 8.2, &["Action"], &["1080p"]),
            ],
        )
        .await;
    let config = ScraperConfig {
        categorize: Categorize::None,
        csv_only: true,
        ..run.config()
    };
    let csv_path = config.csv_path.clone();

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    // default quality is 1080p: one matching torrent per movie
    assert_eq!(summary.csv_rows, 2);
    assert_eq!(summary.files_written, 0);
    assert!(!run.root.exists());

    let content = std::fs::read_to_string(csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"YTS ID\""));
    assert!(lines[1].contains("\"https://www.imdb.com/title/tt0000001\""));
}

#[tokio::test]
async fn test_csv_only_with_genre_categories_still_logs() {
    let run = Run::new();
    run.catalog
        .set_page(
            1,
            vec![fixtures::movie(1, "Alien", 1979, 8.5, &["Horror", "Sci-Fi"], &["1080p"])],
        )
        .await;
    let config = ScraperConfig {
        categorize: Categorize::Genre,
        csv_only: true,
        ..run.config()
    };

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    // one row per variant, not per genre
    assert_eq!(summary.csv_rows, 1);
    assert_eq!(summary.files_written, 0);
    assert!(!run.root.exists());
}

#[tokio::test]
async fn test_csv_log_alongside_downloads() {
    let run = Run::new();
    run.catalog
        .set_page(1, vec![fixtures::movie(1, "Heat", 1995, 8.3, &["Crime"], &["1080p"])])
        .await;
    let config = ScraperConfig {
        csv_log: true,
        poster: true,
        ..run.config()
    };
    let csv_path = config.csv_path.clone();

    let summary = assert_ok!(run
        .scraper(config, Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.csv_rows, 1);
    assert_eq!(summary.files_written, 1);
    assert!(csv_path.is_file());
    assert_eq!(count_files(&run.root, "torrent"), 1);
    assert_eq!(count_files(&run.root, "jpg"), 1);
}

#[tokio::test]
async fn test_small_result_set_fetches_only_first_page() {
    let run = Run::new();
    run.catalog.set_page(1, numbered(1..=3)).await;

    let summary = assert_ok!(run
        .scraper(run.config(), Arc::new(ScriptedPrompt::default()))
        .run()
        .await);

    assert_eq!(summary.movie_count, 3);
    assert_eq!(summary.pages_fetched, 1);
    // count request plus page 1
    let requests = run.catalog.listing_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests[1].ends_with("page=1"));
}
