//! Catalog filter values shared by the config file, the CLI and the API query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Torrent quality filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    All,
    #[serde(rename = "720p")]
    P720,
    #[default]
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2160p")]
    P2160,
    #[serde(rename = "3d")]
    ThreeD,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::All,
        Quality::P720,
        Quality::P1080,
        Quality::P2160,
        Quality::ThreeD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::All => "all",
            Quality::P720 => "720p",
            Quality::P1080 => "1080p",
            Quality::P2160 => "2160p",
            Quality::ThreeD => "3d",
        }
    }

    /// Value sent in the `quality` query parameter.
    pub fn api_value(&self) -> &'static str {
        match self {
            Quality::ThreeD => "3D",
            other => other.as_str(),
        }
    }

    /// Whether a torrent labelled `label` passes this filter.
    ///
    /// The catalog reports `3D` while users type `3d`, so labels compare
    /// case-insensitively.
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Quality::All => true,
            other => other.as_str().eq_ignore_ascii_case(label),
        }
    }
}

/// Genre filter. `All` disables genre filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    #[default]
    All,
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    FilmNoir,
    GameShow,
    History,
    Horror,
    Music,
    Musical,
    Mystery,
    News,
    RealityTv,
    Romance,
    SciFi,
    Sport,
    TalkShow,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 27] = [
        Genre::All,
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::GameShow,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Musical,
        Genre::Mystery,
        Genre::News,
        Genre::RealityTv,
        Genre::Romance,
        Genre::SciFi,
        Genre::Sport,
        Genre::TalkShow,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::All => "all",
            Genre::Action => "action",
            Genre::Adventure => "adventure",
            Genre::Animation => "animation",
            Genre::Biography => "biography",
            Genre::Comedy => "comedy",
            Genre::Crime => "crime",
            Genre::Documentary => "documentary",
            Genre::Drama => "drama",
            Genre::Family => "family",
            Genre::Fantasy => "fantasy",
            Genre::FilmNoir => "film-noir",
            Genre::GameShow => "game-show",
            Genre::History => "history",
            Genre::Horror => "horror",
            Genre::Music => "music",
            Genre::Musical => "musical",
            Genre::Mystery => "mystery",
            Genre::News => "news",
            Genre::RealityTv => "reality-tv",
            Genre::Romance => "romance",
            Genre::SciFi => "sci-fi",
            Genre::Sport => "sport",
            Genre::TalkShow => "talk-show",
            Genre::Thriller => "thriller",
            Genre::War => "war",
            Genre::Western => "western",
        }
    }
}

/// Listing sort key as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Title,
    Year,
    Rating,
    /// Newest additions first. Sent to the API as `date_added` descending.
    #[default]
    Latest,
    Peers,
    Seeds,
    DownloadCount,
    LikeCount,
    DateAdded,
}

impl SortBy {
    pub const ALL: [SortBy; 9] = [
        SortBy::Title,
        SortBy::Year,
        SortBy::Rating,
        SortBy::Latest,
        SortBy::Peers,
        SortBy::Seeds,
        SortBy::DownloadCount,
        SortBy::LikeCount,
        SortBy::DateAdded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "title",
            SortBy::Year => "year",
            SortBy::Rating => "rating",
            SortBy::Latest => "latest",
            SortBy::Peers => "peers",
            SortBy::Seeds => "seeds",
            SortBy::DownloadCount => "download_count",
            SortBy::LikeCount => "like_count",
            SortBy::DateAdded => "date_added",
        }
    }

    /// Value sent in the `sort_by` query parameter.
    pub fn api_value(&self) -> &'static str {
        match self {
            SortBy::Latest => "date_added",
            other => other.as_str(),
        }
    }

    pub fn order(&self) -> SortOrder {
        match self {
            SortBy::Latest => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Directory layout for downloaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Categorize {
    None,
    #[default]
    Rating,
    Genre,
    RatingGenre,
    GenreRating,
}

impl Categorize {
    pub const ALL: [Categorize; 5] = [
        Categorize::None,
        Categorize::Rating,
        Categorize::Genre,
        Categorize::RatingGenre,
        Categorize::GenreRating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Categorize::None => "none",
            Categorize::Rating => "rating",
            Categorize::Genre => "genre",
            Categorize::RatingGenre => "rating-genre",
            Categorize::GenreRating => "genre-rating",
        }
    }

    /// Whether files are placed once per genre tag of a movie.
    pub fn is_genre_aware(&self) -> bool {
        matches!(
            self,
            Categorize::Genre | Categorize::RatingGenre | Categorize::GenreRating
        )
    }

    /// Default output folder name: the scheme name in title case.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Categorize::None => "None",
            Categorize::Rating => "Rating",
            Categorize::Genre => "Genre",
            Categorize::RatingGenre => "Rating-Genre",
            Categorize::GenreRating => "Genre-Rating",
        }
    }
}

macro_rules! impl_filter_text {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_filter_text!(Quality, "quality");
impl_filter_text!(Genre, "genre");
impl_filter_text!(SortBy, "sort_by");
impl_filter_text!(Categorize, "categorize");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_matches_case_insensitive() {
        assert!(Quality::ThreeD.matches("3D"));
        assert!(Quality::P1080.matches("1080p"));
        assert!(!Quality::P1080.matches("720p"));
        assert!(Quality::All.matches("anything"));
    }

    #[test]
    fn test_quality_api_value() {
        assert_eq!(Quality::ThreeD.api_value(), "3D");
        assert_eq!(Quality::P720.api_value(), "720p");
    }

    #[test]
    fn test_latest_maps_to_date_added_desc() {
        assert_eq!(SortBy::Latest.api_value(), "date_added");
        assert_eq!(SortBy::Latest.order(), SortOrder::Desc);
        assert_eq!(SortBy::DateAdded.order(), SortOrder::Asc);
        assert_eq!(SortBy::DownloadCount.api_value(), "download_count");
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!("film-noir".parse::<Genre>().unwrap(), Genre::FilmNoir);
        assert_eq!("genre-rating".parse::<Categorize>().unwrap(), Categorize::GenreRating);
        assert_eq!("like_count".parse::<SortBy>().unwrap(), SortBy::LikeCount);
        assert_eq!("3D".parse::<Quality>().unwrap(), Quality::ThreeD);
    }

    #[test]
    fn test_parse_unknown_genre_fails() {
        let err = "polka".parse::<Genre>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "genre", .. }));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{}\"", genre.as_str()));
        }
        for quality in Quality::ALL {
            let json = serde_json::to_string(&quality).unwrap();
            assert_eq!(json, format!("\"{}\"", quality.as_str()));
        }
        for sort in SortBy::ALL {
            let json = serde_json::to_string(&sort).unwrap();
            assert_eq!(json, format!("\"{}\"", sort.as_str()));
        }
        for scheme in Categorize::ALL {
            let json = serde_json::to_string(&scheme).unwrap();
            assert_eq!(json, format!("\"{}\"", scheme.as_str()));
        }
    }

    #[test]
    fn test_folder_names() {
        assert_eq!(Categorize::RatingGenre.folder_name(), "Rating-Genre");
        assert_eq!(Categorize::None.folder_name(), "None");
        assert!(Categorize::GenreRating.is_genre_aware());
        assert!(!Categorize::Rating.is_genre_aware());
        assert!(!Categorize::None.is_genre_aware());
    }
}
