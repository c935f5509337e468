use crate::input::{self, Entry};
use itertools::Itertools;
use log::{info, warn};
use std::collections::HashMap;

fn explain_metadata(counts: &HashMap<&str, usize>) -> String {
    counts
        .iter()
        .sorted()
        .map(|(k, n)| format!("{k} ({n})"))
        .join(", ")
}

/// Log an overview of the parsed entries.
pub fn statistics(entries: &[Entry]) {
    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for e in entries {
        for (k, v) in &e.metadata {
            *tag_counts.entry(k.as_str()).or_default() += v.len();
        }
    }
    info!(target: "words750", "entries: {}", entries.len());
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        info!(target: "words750", "dates: {} to {}", first.date, last.date);
    }
    info!(
        target: "words750",
        "words reported by the site: {}",
        input::word_counts(entries).iter().sum::<u64>()
    );
    info!(
        target: "words750",
        "minutes: {}",
        entries.iter().map(|e| e.minutes).sum::<u64>()
    );
    info!(target: "words750", "metadata tags: {}", explain_metadata(&tag_counts));
    for (a, b) in entries.iter().tuple_windows() {
        if b.date <= a.date {
            warn!(
                target: "words750",
                "entries out of order: {} followed by {}",
                a.date,
                b.date
            );
        }
    }
}
