use super::*;

use crate::analytical::read_analytical;

fn dated(id: u64, date: &str) -> FlatRecord {
    FlatRecord::new(id).with_release_date(date)
}

#[test]
fn decade_from_release_date() {
    let rows = prepare(&[dated(1, "1987-05-01"), dated(2, "2000-01-01")]);
    assert_eq!(rows[0].year, Some(1987));
    assert_eq!(rows[0].decade, "1980s");
    assert_eq!(rows[1].decade, "2000s");
}

#[test]
fn bad_or_missing_date_leaves_derived_columns_empty() {
    let rows = prepare(&[dated(1, "unknown"), FlatRecord::new(2)]);
    for row in &rows {
        assert_eq!(row.year, None);
        assert_eq!(row.decade, "");
    }
}

#[test]
fn main_country_and_language_are_first_entries() {
    let mut record = FlatRecord::new(1);
    record.production_countries = Some("France, Germany".to_string());
    record.spoken_languages = Some("French, English".to_string());

    let row = &prepare(&[record])[0];
    assert_eq!(row.main_country.as_deref(), Some("France"));
    assert_eq!(row.main_language.as_deref(), Some("French"));
}

#[test]
fn absent_lists_give_absent_main_values() {
    let row = &prepare(&[FlatRecord::new(1)])[0];
    assert_eq!(row.main_country, None);
    assert_eq!(row.main_language, None);
}

#[test]
fn jr_suffix_is_joined() {
    assert_eq!(
        fix_name_suffixes("Robert Downey, Jr., Gwyneth Paltrow"),
        "Robert Downey Jr., Gwyneth Paltrow"
    );

    let mut record = FlatRecord::new(1);
    record.actors = Some("Sammy Davis, Jr., Dean Martin".to_string());
    let row = &prepare(&[record])[0];
    assert_eq!(row.actors.as_deref(), Some("Sammy Davis Jr., Dean Martin"));
}

#[test]
fn run_prepare_writes_analytical_table() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache").join("tmdb_data.csv");
    let output = dir.path().join("processed").join("final_movies.csv");

    let mut record = dated(11104, "1994-07-14").with_title("Chungking Express");
    record.production_countries = Some("Hong Kong".to_string());
    CachedTable::from_records([record, FlatRecord::new(2)])
        .save(&cache)
        .unwrap();

    let summary = run_prepare(&cache, &output).unwrap();
    assert_eq!(summary, PrepareSummary { rows: 2, undated: 1 });

    let rows = read_analytical(&output).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].decade, "1990s");
    assert_eq!(rows[0].main_country.as_deref(), Some("Hong Kong"));
    assert_eq!(rows[1].year, None);
}

#[test]
fn run_prepare_without_cache_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_prepare(&dir.path().join("missing.csv"), &dir.path().join("out.csv"));
    assert!(err.is_err());
}
