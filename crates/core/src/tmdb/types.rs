use serde::Serialize;

/// A movie from TMDB search or details.
#[derive(Debug, Clone, Serialize)]
pub struct TmdbMovie {
    pub id: u32,
    pub title: String,
    pub original_title: Option<String>,
    /// Release year derived from the release date.
    pub year: Option<u16>,
    pub overview: Option<String>,
    /// Details only, never present in search results.
    pub runtime_minutes: Option<u32>,
    /// IMDb id such as "tt0084787". Details only.
    pub imdb_id: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub genres: Vec<String>,
}

/// A TV series from TMDB search or details.
#[derive(Debug, Clone, Serialize)]
pub struct TmdbSeries {
    pub id: u32,
    pub name: String,
    pub original_name: Option<String>,
    pub year: Option<u16>,
    pub overview: Option<String>,
    pub imdb_id: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub genres: Vec<String>,
    pub number_of_seasons: u32,
    /// Specials (season 0) excluded.
    pub seasons: Vec<TmdbSeasonSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TmdbSeasonSummary {
    pub season_number: u32,
    pub name: Option<String>,
    pub episode_count: u32,
    pub air_date: Option<String>,
}

/// One season with its episode list.
#[derive(Debug, Clone, Serialize)]
pub struct TmdbSeason {
    pub season_number: u32,
    pub name: Option<String>,
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TmdbEpisode {
    pub episode_number: u32,
    pub name: String,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub vote_average: Option<f32>,
}

/// First four digits of a TMDB date string, e.g. "1999-03-30" → 1999.
pub(crate) fn year_of(date: Option<&str>) -> Option<u16> {
    date?.get(..4)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_of_date() {
        assert_eq!(year_of(Some("1999-03-30")), Some(1999));
        assert_eq!(year_of(Some("")), None);
        assert_eq!(year_of(None), None);
        assert_eq!(year_of(Some("n/a")), None);
    }
}
