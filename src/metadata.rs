//! Metadata tags embedded in entry text.
//!
//! Any body line of the form `KEY: value`, where `KEY` is a run of uppercase
//! letters, is a tag. Tags stay in the text and are also collected per entry,
//! so that custom variables (mood, weather, sleep, ...) can be followed over time.

use crate::input::{Entry, TagValue};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+):").expect("TAG_PATTERN regex is invalid"));

/// A classified metadata line.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataTag {
    pub key: String,
    /// Everything after the first colon, trimmed.
    pub value: String,
    /// The first token of `value`, if it is a number.
    pub number: Option<f64>,
}

impl MetadataTag {
    pub fn to_tag_value(&self) -> TagValue {
        TagValue {
            value: self.value.clone(),
            number: self.number,
        }
    }
}

/// Classify one line; `None` if it is plain content.
pub fn classify_line(line: &str) -> Option<MetadataTag> {
    let caps = TAG_PATTERN.captures(line)?;
    let key = &caps[1];
    let value = line[key.len() + 1..].trim();
    Some(MetadataTag {
        key: key.to_owned(),
        value: value.to_owned(),
        number: leading_number(value),
    })
}

fn leading_number(value: &str) -> Option<f64> {
    value.split_whitespace().next()?.parse().ok()
}

/// One tag occurrence together with the entry it came from.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TagRecord {
    pub date: NaiveDate,
    pub minutes: u64,
    pub words: u64,
    pub value: String,
    pub number: Option<f64>,
}

/// All tag occurrences across entries, keyed by tag name, in entry order.
pub fn collect_metadata(entries: &[Entry]) -> BTreeMap<String, Vec<TagRecord>> {
    let mut all: BTreeMap<String, Vec<TagRecord>> = BTreeMap::new();
    for entry in entries {
        for (key, values) in &entry.metadata {
            let records = all.entry(key.clone()).or_default();
            for tv in values {
                records.push(TagRecord {
                    date: entry.date,
                    minutes: entry.minutes,
                    words: entry.word_count,
                    value: tv.value.clone(),
                    number: tv.number,
                });
            }
        }
    }
    all
}

/// The numeric values of a tag as `(date, number)` points.
///
/// Returns `None` unless at least two records carry a number, since a single
/// point does not make a series.
pub fn numeric_series(records: &[TagRecord]) -> Option<Vec<(NaiveDate, f64)>> {
    let points: Vec<(NaiveDate, f64)> = records
        .iter()
        .filter_map(|r| r.number.map(|n| (r.date, n)))
        .collect();
    if points.len() >= 2 { Some(points) } else { None }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Metadata;

    fn tag(key: &str, value: &str, number: Option<f64>) -> Option<MetadataTag> {
        Some(MetadataTag {
            key: key.to_owned(),
            value: value.to_owned(),
            number,
        })
    }

    #[test]
    fn classify_basic() {
        assert_eq!(classify_line("MOOD: 7 happy"), tag("MOOD", "7 happy", Some(7.0)));
        assert_eq!(classify_line("WEATHER: rainy"), tag("WEATHER", "rainy", None));
        assert_eq!(classify_line("SLEEP:6.5"), tag("SLEEP", "6.5", Some(6.5)));
        assert_eq!(classify_line("X: -2 degrees"), tag("X", "-2 degrees", Some(-2.0)));
    }

    #[test]
    fn classify_not_metadata() {
        assert_eq!(classify_line("just a sentence: with a colon"), None);
        assert_eq!(classify_line("Mood: 7"), None);
        assert_eq!(classify_line(" MOOD: 7"), None);
        assert_eq!(classify_line("MOOD : 7"), None);
        assert_eq!(classify_line(": nothing"), None);
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("NO COLON HERE"), None);
    }

    #[test]
    fn classify_splits_on_first_colon() {
        assert_eq!(
            classify_line("TIME:  10:30 in the morning  "),
            tag("TIME", "10:30 in the morning", None)
        );
    }

    #[test]
    fn classify_empty_value() {
        assert_eq!(classify_line("EMPTY:"), tag("EMPTY", "", None));
        assert_eq!(classify_line("EMPTY:   "), tag("EMPTY", "", None));
    }

    fn entry(day: u32, metadata: &[(&str, &str, Option<f64>)]) -> Entry {
        let mut md = Metadata::new();
        for &(k, v, n) in metadata {
            md.entry(k.to_owned()).or_default().push(TagValue {
                value: v.to_owned(),
                number: n,
            });
        }
        Entry {
            date: NaiveDate::from_ymd_opt(2013, 3, day).unwrap(),
            word_count: 800,
            minutes: 20,
            metadata: md,
            text: String::new(),
        }
    }

    #[test]
    fn collect_keeps_order_and_repeats() {
        let entries = vec![
            entry(1, &[("MOOD", "7", Some(7.0)), ("MOOD", "8", Some(8.0))]),
            entry(2, &[("WEATHER", "sunny", None)]),
            entry(3, &[("MOOD", "meh", None)]),
        ];
        let all = collect_metadata(&entries);
        assert_eq!(all.keys().collect::<Vec<_>>(), ["MOOD", "WEATHER"]);
        let mood = &all["MOOD"];
        assert_eq!(mood.len(), 3);
        assert_eq!(mood[0].value, "7");
        assert_eq!(mood[1].value, "8");
        assert_eq!(mood[2].date, NaiveDate::from_ymd_opt(2013, 3, 3).unwrap());
        assert_eq!(mood[2].number, None);
        assert_eq!(mood[0].words, 800);
        assert_eq!(mood[0].minutes, 20);
    }

    #[test]
    fn numeric_series_needs_two_points() {
        let entries = vec![
            entry(1, &[("MOOD", "7", Some(7.0))]),
            entry(2, &[("MOOD", "meh", None)]),
            entry(3, &[("MOOD", "5", Some(5.0))]),
        ];
        let all = collect_metadata(&entries);
        assert_eq!(
            numeric_series(&all["MOOD"]),
            Some(vec![
                (NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(), 7.0),
                (NaiveDate::from_ymd_opt(2013, 3, 3).unwrap(), 5.0),
            ])
        );
        assert_eq!(numeric_series(&all["MOOD"][..2]), None);
        assert_eq!(numeric_series(&[]), None);
    }
}
