//! Value counts over the filtered rows.

use std::collections::HashMap;

use reelstats_core::delimited;

/// One bar: a label and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

impl Count {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Count occurrences of each non-empty value. Sorted by count descending,
/// then label ascending.
pub fn tally<I, S>(values: I) -> Vec<Count>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        let v = v.as_ref().trim();
        if !v.is_empty() {
            *counts.entry(v.to_string()).or_default() += 1;
        }
    }
    let mut out: Vec<Count> = counts
        .into_iter()
        .map(|(label, count)| Count { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

/// Count every value of a multi-valued field, one per delimited entry.
pub fn tally_exploded<'a, I>(fields: I) -> Vec<Count>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    tally(fields.into_iter().flatten().flat_map(delimited::split))
}

/// The `n` largest counts. Input must already be in [`tally`] order.
pub fn top_n(mut counts: Vec<Count>, n: usize) -> Vec<Count> {
    counts.truncate(n);
    counts
}

/// Reorder by the numeric prefix of the label (`"1994"`, `"1990s"`).
pub fn chronological(mut counts: Vec<Count>) -> Vec<Count> {
    counts.sort_by(|a, b| {
        leading_number(&a.label)
            .cmp(&leading_number(&b.label))
            .then_with(|| a.label.cmp(&b.label))
    });
    counts
}

fn leading_number(label: &str) -> Option<i64> {
    let digits: String = label
        .trim()
        .chars()
        .enumerate()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
        .map(|(_, c)| c)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_break_by_label() {
        let counts = tally(["b", "a", "c", "c", ""]);
        assert_eq!(
            counts,
            vec![Count::new("c", 2), Count::new("a", 1), Count::new("b", 1)]
        );
    }

    #[test]
    fn exploded_counts_each_value() {
        let counts = tally_exploded([Some("Action, Drama"), Some("Drama"), None]);
        assert_eq!(counts, vec![Count::new("Drama", 2), Count::new("Action", 1)]);
    }

    #[test]
    fn top_n_truncates() {
        let counts = tally(["a", "a", "b", "c"]);
        assert_eq!(top_n(counts, 2).len(), 2);
    }

    #[test]
    fn chronological_orders_years_and_decades() {
        let years = chronological(vec![Count::new("2001", 1), Count::new("1994", 3)]);
        assert_eq!(years[0].label, "1994");

        let decades = chronological(vec![
            Count::new("2000s", 1),
            Count::new("1900s", 1),
            Count::new("1990s", 5),
        ]);
        let labels: Vec<_> = decades.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["1900s", "1990s", "2000s"]);
    }
}
