//! Main entry point for calculating everything.

use crate::errors::{self, Result};
use crate::information;
use crate::input::{self, Journal};
use crate::lexicon::Lexicon;
use crate::metadata;
use crate::output::{OEntry, Output};
use crate::parser;
use crate::streak::StreakReport;
use crate::wordstats::{self, StatsConfig};
use itertools::Itertools;
use log::{debug, info};

/// What to calculate?
pub struct DriverArgs<'a> {
    /// Prefix of the entry headings in the display text.
    pub header_prefix: &'a str,

    /// Word statistics settings, shared by per-entry and overall statistics.
    pub stats: StatsConfig,

    /// Linguistic data for enriching the overall statistics, if available.
    pub lexicon: Option<&'a dyn Lexicon>,
}

/// Parse the export text; fails if there are no entries.
pub fn parse(args: &DriverArgs, raw_text: &str) -> Result<Journal> {
    let journal = parser::parse_export(raw_text, args.header_prefix)?;
    information::statistics(&journal.entries);
    if journal.entries.is_empty() {
        return Err(errors::invalid_input_ref("no entries found"));
    }
    Ok(journal)
}

/// Calculate everything.
///
/// This is the main entry point for the library.
pub fn calc(args: &DriverArgs, journal: &Journal) -> Output {
    let entries = &journal.entries;
    let report = StreakReport::new(&input::days(entries));
    info!(
        target: "words750",
        "streaks: {}, longest: {} days",
        report.streaks.len(),
        report.longest().map_or(0, |s| s.length)
    );
    let per_entry = wordstats::entry_statistics(entries, &args.stats, None);
    let total = wordstats::aggregate_statistics(entries, &args.stats, args.lexicon);
    debug!(target: "words750", "total: {} words", total.total_words);
    let entries = entries
        .iter()
        .zip(per_entry)
        .map(|(e, s)| OEntry {
            date: e.date,
            minutes: e.minutes,
            site_words: e.word_count,
            words: s.total_words,
            meets_goal: s.meets_goal,
            mean_word_length: s.mean_word_length(),
            profanity_count: s.profanity_count,
            ratios: s.ratios,
        })
        .collect_vec();
    Output {
        entries,
        streaks: report,
        total,
        metadata: metadata::collect_metadata(&journal.entries),
    }
}
