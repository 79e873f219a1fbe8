//! Row selection for the dashboard.

use std::fmt;
use std::str::FromStr;

use reelstats_core::AnalyticalRecord;
use reelstats_core::delimited;

const USA: &str = "united states of america";
const ENGLISH: &str = "english";

/// Three-way switch over a yes/no property of a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Toggle {
    #[default]
    All,
    Is,
    IsNot,
}

impl Toggle {
    fn admits(self, has_property: bool) -> bool {
        match self {
            Self::All => true,
            Self::Is => has_property,
            Self::IsNot => !has_property,
        }
    }
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "only" | "is" | "yes" => Ok(Self::Is),
            "exclude" | "not" | "no" => Ok(Self::IsNot),
            other => Err(format!(
                "unknown toggle '{other}' (expected all, only or exclude)"
            )),
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Is => write!(f, "only"),
            Self::IsNot => write!(f, "exclude"),
        }
    }
}

/// The user's filter choices. Empty lists mean "no filter"; all filters are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Exact `main_country` values.
    pub countries: Vec<String>,
    /// Exact `decade` labels such as `"1990s"`.
    pub decades: Vec<String>,
    /// Exact `main_language` values.
    pub languages: Vec<String>,
    /// A row matches when any of its genres is listed here.
    pub genres: Vec<String>,
    /// Main country is the United States of America.
    pub usa: Toggle,
    /// Main language is English.
    pub english: Toggle,
}

impl FilterSelection {
    pub fn matches(&self, row: &AnalyticalRecord) -> bool {
        one_of(&self.countries, row.main_country.as_deref())
            && self.usa.admits(contains_ci(row.main_country.as_deref(), USA))
            && one_of(&self.decades, Some(row.decade.as_str()))
            && one_of(&self.languages, row.main_language.as_deref())
            && self
                .english
                .admits(contains_ci(row.main_language.as_deref(), ENGLISH))
            && (self.genres.is_empty() || delimited::any_in(row.genres.as_deref(), &self.genres))
    }

    pub fn apply<'a>(&self, rows: &'a [AnalyticalRecord]) -> Vec<&'a AnalyticalRecord> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Human-readable list of the active filters.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let mut active = Vec::new();
        let lists = [
            ("Country", &self.countries),
            ("Decade", &self.decades),
            ("Language", &self.languages),
            ("Genre", &self.genres),
        ];
        for (name, values) in lists {
            if !values.is_empty() {
                active.push((name, values.join(", ")));
            }
        }
        if self.usa != Toggle::All {
            active.push(("USA", self.usa.to_string()));
        }
        if self.english != Toggle::All {
            active.push(("English", self.english.to_string()));
        }
        active
    }
}

fn one_of(selected: &[String], value: Option<&str>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.iter().any(|s| s == v))
}

fn contains_ci(value: Option<&str>, needle: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(needle))
}
