//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use yifi_core::{Categorize, Genre, Quality, ScraperOverrides, SortBy};

/// Download torrent files and covers from the YTS movie catalog.
#[derive(Debug, Parser)]
#[command(name = "yifi", version, about)]
pub struct Args {
    /// Output directory [default: name of the categorization scheme]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Torrent quality: all, 720p, 1080p, 2160p or 3d
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Genre filter, e.g. all, action, sci-fi
    #[arg(short, long)]
    pub genre: Option<Genre>,

    /// Minimum IMDb rating
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub rating: Option<u8>,

    /// Sort key: title, year, rating, latest, peers, seeds, download_count,
    /// like_count or date_added
    #[arg(short, long)]
    pub sort_by: Option<SortBy>,

    /// Directory layout: none, rating, genre, rating-genre or genre-rating
    #[arg(short, long)]
    pub categorize: Option<Categorize>,

    /// Skip movies released before this year
    #[arg(short, long)]
    pub year_limit: Option<u32>,

    /// Also download cover images, one directory per movie
    #[arg(short = 'b', long)]
    pub background: bool,

    /// Append the IMDb id to file names
    #[arg(short, long)]
    pub imdb: bool,

    /// Process each listing page with a pool of workers
    #[arg(short, long)]
    pub multiprocess: bool,

    /// Only write the CSV log, no torrent or cover files
    #[arg(long)]
    pub csv: bool,

    /// Write the CSV log while downloading
    #[arg(long)]
    pub csv_log: bool,

    /// CSV log file
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Listing page to start from
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// TOML configuration file
    #[arg(long, env = "YIFI_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Settings given on the command line. Unset flags leave lower layers alone.
    pub fn overrides(&self) -> ScraperOverrides {
        ScraperOverrides {
            output: self.output.clone(),
            quality: self.quality,
            genre: self.genre,
            minimum_rating: self.rating,
            sort_by: self.sort_by,
            categorize: self.categorize,
            year_limit: self.year_limit,
            poster: self.background.then_some(true),
            imdb_id: self.imdb.then_some(true),
            concurrent: self.multiprocess.then_some(true),
            csv_only: self.csv.then_some(true),
            csv_log: self.csv_log.then_some(true),
            csv_path: self.csv_path.clone(),
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_means_no_overrides() {
        let args = Args::try_parse_from(["yifi"]).unwrap();
        assert_eq!(args.overrides(), ScraperOverrides::default());
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "yifi", "-q", "3d", "-g", "sci-fi", "-r", "7", "-s", "latest", "-c", "genre-rating",
            "-y", "1990", "-b", "-i", "-m", "-p", "3",
        ])
        .unwrap();
        let overrides = args.overrides();

        assert_eq!(overrides.quality, Some(Quality::ThreeD));
        assert_eq!(overrides.genre, Some(Genre::SciFi));
        assert_eq!(overrides.minimum_rating, Some(7));
        assert_eq!(overrides.sort_by, Some(SortBy::Latest));
        assert_eq!(overrides.categorize, Some(Categorize::GenreRating));
        assert_eq!(overrides.year_limit, Some(1990));
        assert_eq!(overrides.poster, Some(true));
        assert_eq!(overrides.imdb_id, Some(true));
        assert_eq!(overrides.concurrent, Some(true));
        assert_eq!(overrides.page, Some(3));
        assert_eq!(overrides.csv_only, None);
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        assert!(Args::try_parse_from(["yifi", "-r", "10"]).is_err());
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(Args::try_parse_from(["yifi", "-p", "0"]).is_err());
    }

    #[test]
    fn test_unknown_quality_rejected() {
        assert!(Args::try_parse_from(["yifi", "-q", "480p"]).is_err());
    }

    #[test]
    fn test_csv_flags() {
        let args =
            Args::try_parse_from(["yifi", "--csv", "--csv-path", "movies.csv"]).unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.csv_only, Some(true));
        assert_eq!(overrides.csv_path, Some(PathBuf::from("movies.csv")));
    }
}
