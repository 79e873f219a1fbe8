use std::collections::BTreeSet;

use reelstats_core::AnalyticalRecord;
use reelstats_core::delimited;

/// Values available to each filter control, sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub decades: Vec<String>,
    pub languages: Vec<String>,
    pub genres: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[AnalyticalRecord]) -> Self {
        let mut countries = BTreeSet::new();
        let mut decades = BTreeSet::new();
        let mut languages = BTreeSet::new();
        let mut genres = BTreeSet::new();

        for row in rows {
            if let Some(c) = row.main_country.as_deref().filter(|c| !c.is_empty()) {
                countries.insert(c.to_string());
            }
            if !row.decade.is_empty() {
                decades.insert(row.decade.clone());
            }
            if let Some(l) = row.main_language.as_deref().filter(|l| !l.is_empty()) {
                languages.insert(l.to_string());
            }
            if let Some(g) = row.genres.as_deref() {
                genres.extend(delimited::split(g).map(str::to_string));
            }
        }

        Self {
            countries: countries.into_iter().collect(),
            decades: decades.into_iter().collect(),
            languages: languages.into_iter().collect(),
            genres: genres.into_iter().collect(),
        }
    }
}
