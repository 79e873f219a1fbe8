//! Flattening a detail response into a [`FlatRecord`].

use reelstats_core::{FlatRecord, MovieId, delimited};

use crate::types::{Credits, CrewMember, MovieDetails};

/// Crew jobs counted as directing.
pub const DIRECTOR_JOBS: &[&str] = &["Director"];

/// Crew jobs counted as writing.
pub const WRITER_JOBS: &[&str] = &["Writer", "Screenplay", "Story", "Novel", "Adaptation"];

/// Crew jobs counted as cinematography.
pub const CINEMATOGRAPHER_JOBS: &[&str] = &["Director of Photography", "Cinematography"];

impl MovieDetails {
    /// Reduce the nested response to a flat record for `id`.
    ///
    /// Missing fields become `None`; nothing here can fail.
    pub fn flatten(&self, id: MovieId) -> FlatRecord {
        let empty = Credits::default();
        let credits = self.credits.as_ref().unwrap_or(&empty);

        FlatRecord {
            tmdb_id: id,
            title: non_empty(self.title.as_deref()),
            release_date: non_empty(self.release_date.as_deref()),
            actors: actors(credits),
            directors: crew_with_jobs(&credits.crew, DIRECTOR_JOBS),
            screenwriters: crew_with_jobs(&credits.crew, WRITER_JOBS),
            cinematographers: crew_with_jobs(&credits.crew, CINEMATOGRAPHER_JOBS),
            runtime: self.runtime,
            genres: delimited::join(self.genres.iter().filter_map(|g| g.name.as_deref())),
            spoken_languages: delimited::join(
                self.spoken_languages
                    .iter()
                    .filter_map(|l| l.english_name.as_deref()),
            ),
            production_countries: delimited::join(
                self.production_countries
                    .iter()
                    .filter_map(|c| c.name.as_deref()),
            ),
        }
    }
}

/// All cast names in billing order.
pub fn actors(credits: &Credits) -> Option<String> {
    delimited::join(credits.cast.iter().filter_map(|c| c.name.as_deref()))
}

/// Names of crew members whose job is in `jobs`, first-seen order, each
/// name once. A writer credited for both "Screenplay" and "Story" appears
/// a single time.
pub fn crew_with_jobs(crew: &[CrewMember], jobs: &[&str]) -> Option<String> {
    let mut names: Vec<&str> = Vec::new();
    for member in crew {
        let (Some(name), Some(job)) = (member.name.as_deref(), member.job.as_deref()) else {
            continue;
        };
        if jobs.contains(&job) && !names.contains(&name) {
            names.push(name);
        }
    }
    delimited::join(names)
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "tests/flatten_tests.rs"]
mod tests;
