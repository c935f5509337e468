//! Data structures for representing the output, and plain-text summaries.

use crate::metadata::TagRecord;
use crate::streak::{Streak, StreakReport};
use crate::wordstats::{Ratio, WordStatistics};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one entry.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OEntry {
    pub date: NaiveDate,
    pub minutes: u64,
    /// As reported by the site.
    pub site_words: u64,
    /// As counted from the cleaned text.
    pub words: u64,
    pub meets_goal: bool,
    pub mean_word_length: Option<f64>,
    pub profanity_count: u64,
    pub ratios: Vec<Ratio>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Output {
    pub entries: Vec<OEntry>,
    pub streaks: StreakReport,
    pub total: WordStatistics,
    pub metadata: BTreeMap<String, Vec<TagRecord>>,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

/// Dates as `d/m/yy`, without leading zeros in the day and the month.
pub fn pretty_date(d: &NaiveDate) -> String {
    d.format("%-d/%-m/%y").to_string()
}

pub fn pretty_streak(s: &Streak) -> String {
    if s.last_day > s.first_day {
        format!(
            "{} ({} - {})",
            s.length,
            pretty_date(&s.first_day),
            pretty_date(&s.last_day)
        )
    } else {
        format!("{} ({})", s.length, pretty_date(&s.first_day))
    }
}

pub fn pretty_streaks(streaks: &[Streak]) -> String {
    streaks.iter().map(pretty_streak).join(", ")
}

pub fn pretty_ratio(r: Option<f64>) -> String {
    match r {
        None => "-".to_owned(),
        Some(x) => format!("{x:.3}"),
    }
}

pub fn streak_summary(report: &StreakReport) -> String {
    let long = report
        .by_length()
        .into_iter()
        .filter(|s| s.length > 1)
        .collect_vec();
    let mut lines = vec![
        format!("Number of entries: {}", report.entries()),
        format!("Streaks > 1 day: {}", pretty_streaks(&long)),
    ];
    if let Some(s) = report.current() {
        lines.push(format!("Current streak: {}", pretty_streak(&s)));
    }
    lines.join("\n")
}

pub fn stats_summary(stats: &WordStatistics, top: usize) -> String {
    let mut lines = vec![format!("Words: {}", stats.total_words)];
    if let Some(x) = stats.mean_word_length() {
        lines.push(format!("Mean word length: {x:.2}"));
    }
    lines.push(format!(
        "Most common words: {}, ...",
        stats
            .most_common(top)
            .iter()
            .map(|(w, n)| format!("{w} ({n})"))
            .join(", ")
    ));
    for r in &stats.ratios {
        lines.push(format!("{}_ratio: {}", r.label, pretty_ratio(r.value)));
    }
    if stats.profanity_count > 0 {
        lines.push(format!("Profanities: {}", stats.profanity_count));
    }
    if let Some(e) = &stats.enrichment {
        if let Some(x) = e.mean_syllables() {
            lines.push(format!("Mean syllables per word: {x:.2}"));
        }
        lines.push(format!(
            "Parts of speech: {}",
            e.parts_of_speech
                .iter()
                .sorted_by(|a, b| b.1.cmp(a.1))
                .map(|(p, n)| format!("{p} ({n})"))
                .join(", ")
        ));
        lines.push(format!(
            "Most common content words: {}, ...",
            e.content_frequencies
                .iter()
                .take(top)
                .map(|(w, n)| format!("{w} ({n})"))
                .join(", ")
        ));
    }
    lines.join("\n")
}
