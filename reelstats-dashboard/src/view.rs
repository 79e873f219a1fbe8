//! Aggregated dashboard content, independent of how it is rendered.

use reelstats_core::AnalyticalRecord;

use crate::color::{self, Palette};
use crate::filter::FilterSelection;
use crate::stats::{self, Count};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along the x axis, in chart order.
    Vertical,
    /// Categories along the y axis, largest at the top.
    Horizontal,
}

/// How bars are coloured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    Solid(String),
    /// Colour mapped to the bar's count.
    Gradient(Palette),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChart {
    /// Stable identifier, used as the element id when rendered.
    pub id: &'static str,
    pub title: String,
    pub orientation: Orientation,
    pub fill: Fill,
    pub bars: Vec<Count>,
}

/// Movies per main production country on a world map. Countries without
/// movies are not listed and render as plain land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryMap {
    pub title: String,
    pub counts: Vec<Count>,
    pub palette: Palette,
}

/// One line of the movie listing under the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub title: String,
    pub year: Option<i32>,
    pub directors: String,
    pub main_country: String,
    pub genres: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Rows left after filtering.
    pub total: usize,
    pub selection: FilterSelection,
    pub charts: Vec<BarChart>,
    pub country_map: CountryMap,
    pub movies: Vec<MovieRow>,
}

impl DashboardView {
    pub fn chart(&self, id: &str) -> Option<&BarChart> {
        self.charts.iter().find(|c| c.id == id)
    }
}

/// Filter `rows` and aggregate every chart.
pub fn build_view(
    rows: &[AnalyticalRecord],
    selection: &FilterSelection,
    top_n: usize,
) -> DashboardView {
    let filtered = selection.apply(rows);
    log::debug!("{} of {} rows match the filters", filtered.len(), rows.len());

    let years = stats::chronological(stats::tally(
        filtered.iter().filter_map(|r| r.year).map(|y| y.to_string()),
    ));
    let decades = stats::chronological(stats::tally(filtered.iter().map(|r| r.decade.as_str())));
    let countries = stats::tally(filtered.iter().filter_map(|r| r.main_country.as_deref()));
    let languages = stats::tally(filtered.iter().filter_map(|r| r.main_language.as_deref()));

    let exploded = |field: fn(&AnalyticalRecord) -> Option<&str>| {
        stats::top_n(stats::tally_exploded(filtered.iter().map(|&r| field(r))), top_n)
    };

    let horizontal = |id, title: &str, fill, bars| BarChart {
        id,
        title: title.to_string(),
        orientation: Orientation::Horizontal,
        fill,
        bars,
    };

    let charts = vec![
        BarChart {
            id: "years",
            title: "Movies by Release Year".to_string(),
            orientation: Orientation::Vertical,
            fill: Fill::Solid(color::BLUE.to_string()),
            bars: years,
        },
        BarChart {
            id: "decades",
            title: "Movies by Decade".to_string(),
            orientation: Orientation::Vertical,
            fill: Fill::Gradient(Palette::blue()),
            bars: decades,
        },
        horizontal(
            "languages",
            &format!("Top {top_n} Languages"),
            Fill::Gradient(Palette::green()),
            stats::top_n(languages, top_n),
        ),
        horizontal(
            "genres",
            &format!("Top {top_n} Genres"),
            Fill::Gradient(Palette::green()),
            exploded(|r| r.genres.as_deref()),
        ),
        horizontal(
            "directors",
            &format!("Top {top_n} Directors"),
            Fill::Gradient(Palette::blue()),
            exploded(|r| r.directors.as_deref()),
        ),
        horizontal(
            "actors",
            &format!("Top {top_n} Actors"),
            Fill::Gradient(Palette::green()),
            exploded(|r| r.actors.as_deref()),
        ),
        horizontal(
            "screenwriters",
            &format!("Top {top_n} Screenwriters"),
            Fill::Gradient(Palette::blue()),
            exploded(|r| r.screenwriters.as_deref()),
        ),
        horizontal(
            "cinematographers",
            &format!("Top {top_n} Cinematographers"),
            Fill::Gradient(Palette::green()),
            exploded(|r| r.cinematographers.as_deref()),
        ),
        horizontal(
            "countries",
            "Movies per Main Production Country",
            Fill::Gradient(Palette::orange()),
            stats::top_n(countries.clone(), top_n),
        ),
    ];

    let movies = filtered
        .iter()
        .map(|r| MovieRow {
            title: r.title.clone().unwrap_or_else(|| format!("tmdb:{}", r.tmdb_id)),
            year: r.year,
            directors: r.directors.clone().unwrap_or_default(),
            main_country: r.main_country.clone().unwrap_or_default(),
            genres: r.genres.clone().unwrap_or_default(),
        })
        .collect();

    DashboardView {
        total: filtered.len(),
        selection: selection.clone(),
        charts,
        country_map: CountryMap {
            title: "Number of Movies per Main Production Country".to_string(),
            counts: countries,
            palette: Palette::orange(),
        },
        movies,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
