use serde::{Deserialize, Deserializer, Serialize};

use crate::MovieId;

/// One movie's metadata reduced to single-level fields.
///
/// Field order is the column order of the cached table. List-valued fields
/// are joined with [`crate::delimited::DELIMITER`]; `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub tmdb_id: MovieId,
    pub title: Option<String>,
    /// Release date as returned by TMDb (`YYYY-MM-DD`), not validated.
    pub release_date: Option<String>,
    pub actors: Option<String>,
    pub directors: Option<String>,
    pub screenwriters: Option<String>,
    pub cinematographers: Option<String>,
    /// Runtime in minutes.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub runtime: Option<u32>,
    pub genres: Option<String>,
    pub spoken_languages: Option<String>,
    pub production_countries: Option<String>,
}

impl FlatRecord {
    /// A record with only the id set.
    pub fn new(tmdb_id: MovieId) -> Self {
        Self {
            tmdb_id,
            title: None,
            release_date: None,
            actors: None,
            directors: None,
            screenwriters: None,
            cinematographers: None,
            runtime: None,
            genres: None,
            spoken_languages: None,
            production_countries: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    /// Title for display, falling back to the id.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) if !t.is_empty() => t.clone(),
            _ => format!("tmdb:{}", self.tmdb_id),
        }
    }
}

/// A cached record plus the columns derived by the post-processing transform.
///
/// Fields are spelled out rather than flattened because the CSV writer does
/// not support `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticalRecord {
    pub tmdb_id: MovieId,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub actors: Option<String>,
    pub directors: Option<String>,
    pub screenwriters: Option<String>,
    pub cinematographers: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub runtime: Option<u32>,
    pub genres: Option<String>,
    pub spoken_languages: Option<String>,
    pub production_countries: Option<String>,
    /// Release year, absent when `release_date` does not parse.
    pub year: Option<i32>,
    /// Decade bucket such as `"1980s"`; empty when the year is absent.
    #[serde(default)]
    pub decade: String,
    /// First entry of `production_countries`.
    pub main_country: Option<String>,
    /// First entry of `spoken_languages`.
    pub main_language: Option<String>,
}

impl AnalyticalRecord {
    /// Attach derived columns to a flat record.
    pub fn from_flat(
        record: FlatRecord,
        year: Option<i32>,
        decade: String,
        main_country: Option<String>,
        main_language: Option<String>,
    ) -> Self {
        Self {
            tmdb_id: record.tmdb_id,
            title: record.title,
            release_date: record.release_date,
            actors: record.actors,
            directors: record.directors,
            screenwriters: record.screenwriters,
            cinematographers: record.cinematographers,
            runtime: record.runtime,
            genres: record.genres,
            spoken_languages: record.spoken_languages,
            production_countries: record.production_countries,
            year,
            decade,
            main_country,
            main_language,
        }
    }
}

/// Accept `"142"`, `"142.0"` and empty cells. Tables written by other tools
/// store integer columns with missing values as floats.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(v) = trimmed.parse::<u32>() {
        return Ok(Some(v));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v as u32)),
        _ => Ok(None),
    }
}
