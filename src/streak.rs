//! Writing streaks: runs of consecutive days on which the goal was met.

use crate::wordstats::GOAL;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Streak {
    /// Number of days.
    pub length: u64,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

/// More than [GOAL] words; a day with exactly [GOAL] words does not count.
pub fn reached_goal(words: u64) -> bool {
    words > GOAL
}

fn follows_previous(days: &[(NaiveDate, u64)], i: usize) -> bool {
    i > 0 && days[i].0 - days[i - 1].0 == Duration::days(1)
}

/// Find all streaks, in chronological order.
///
/// `days` holds the date and the word count of each entry, in the order of
/// the entries. Only entries that are exactly one day apart are consecutive,
/// so the entries have to be sorted by date.
pub fn find_streaks(days: &[(NaiveDate, u64)]) -> Vec<Streak> {
    let Some(&(first, _)) = days.first() else {
        return vec![];
    };
    let mut streaks = vec![];
    let mut length = 0;
    let mut start = first;
    for (i, &(date, words)) in days.iter().enumerate() {
        let reached = reached_goal(words);
        let consecutive = follows_previous(days, i);
        if !consecutive {
            if length > 0 {
                streaks.push(Streak {
                    length,
                    first_day: start,
                    last_day: days[i - 1].0,
                });
            }
            length = 0;
        }
        if reached && length == 0 {
            start = date;
        }
        if length == 0 && reached {
            length = 1;
            continue;
        }
        if length > 0 && reached && consecutive {
            length += 1;
            continue;
        }
        if length > 0 && (!reached || !consecutive) {
            streaks.push(Streak {
                length,
                first_day: start,
                last_day: days[i - 1].0,
            });
            length = 0;
        }
    }
    if length > 0 {
        streaks.push(Streak {
            length,
            first_day: start,
            last_day: days[days.len() - 1].0,
        });
    }
    streaks
}

/// Performance in terms of the daily goal.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StreakReport {
    pub dates: Vec<NaiveDate>,
    pub words: Vec<u64>,
    /// Did the entry reach the goal?
    pub successes: Vec<bool>,
    /// Was there an entry on the previous day?
    pub consecutive: Vec<bool>,
    pub streaks: Vec<Streak>,
}

impl StreakReport {
    pub fn new(days: &[(NaiveDate, u64)]) -> StreakReport {
        StreakReport {
            dates: days.iter().map(|d| d.0).collect(),
            words: days.iter().map(|d| d.1).collect(),
            successes: days.iter().map(|d| reached_goal(d.1)).collect(),
            consecutive: (0..days.len()).map(|i| follows_previous(days, i)).collect(),
            streaks: find_streaks(days),
        }
    }

    pub fn entries(&self) -> usize {
        self.dates.len()
    }

    /// Streaks from the longest to the shortest; ties latest first.
    pub fn by_length(&self) -> Vec<Streak> {
        let mut streaks = self.streaks.clone();
        streaks.sort_by(|a, b| b.cmp(a));
        streaks
    }

    pub fn longest(&self) -> Option<Streak> {
        self.by_length().first().copied()
    }

    /// The streak that includes the last entry, if any.
    pub fn current(&self) -> Option<Streak> {
        let last = *self.dates.last()?;
        self.streaks.last().copied().filter(|s| s.last_day == last)
    }
}
