//! Data structures for representing parsed journal entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One occurrence of a metadata tag: the raw value and its leading number, if any.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TagValue {
    pub value: String,
    pub number: Option<f64>,
}

/// Metadata tags of one entry, keyed by the uppercase tag name.
/// Repeated tags keep every value, in order of appearance.
pub type Metadata = BTreeMap<String, Vec<TagValue>>;

/// One day's journal submission.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    pub date: NaiveDate,
    /// Word count as reported by the site.
    pub word_count: u64,
    pub minutes: u64,
    pub metadata: Metadata,
    /// Body text, including any metadata lines.
    pub text: String,
}

/// Parser output.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Journal {
    /// Export text with the entry headers replaced by Markdown headings.
    pub display_text: String,
    pub entries: Vec<Entry>,
}

/// Number of whitespace-separated tokens.
pub fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

pub fn dates(entries: &[Entry]) -> Vec<NaiveDate> {
    entries.iter().map(|e| e.date).collect()
}

pub fn word_counts(entries: &[Entry]) -> Vec<u64> {
    entries.iter().map(|e| e.word_count).collect()
}

/// Word counts recomputed from the entry text.
pub fn recomputed_word_counts(entries: &[Entry]) -> Vec<u64> {
    entries.iter().map(|e| count_words(&e.text)).collect()
}

/// `(date, recomputed word count)` pairs, the input of the streak calculation.
pub fn days(entries: &[Entry]) -> Vec<(NaiveDate, u64)> {
    entries
        .iter()
        .map(|e| (e.date, count_words(&e.text)))
        .collect()
}
