//! Word statistics for a body of text.

use crate::cleaner::Cleaner;
use crate::input::Entry;
use crate::lexicon::{Lexicon, PartOfSpeech};
use crate::parallelism;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Daily word goal.
pub const GOAL: u64 = 750;

/// Number of most frequent words treated as stop words.
pub const DEFAULT_STOPWORD_CUTOFF: usize = 100;

/// Tokens containing any of these count as profanities.
pub const PROFANITIES: [&str; 6] = ["fuck", "shit", "damn", "crap", "bitch", "bastard"];

/// How often `word` occurs among all of `words`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RatioDef {
    pub label: String,
    pub word: String,
    pub words: Vec<String>,
}

impl RatioDef {
    pub fn new(label: &str, word: &str, words: &[&str]) -> RatioDef {
        RatioDef {
            label: label.to_owned(),
            word: word.to_owned(),
            words: words.iter().map(|&w| w.to_owned()).collect(),
        }
    }

    /// Labels have to start with a letter or an underscore.
    pub fn is_valid(&self) -> bool {
        self.label
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    }
}

pub fn default_ratios() -> Vec<RatioDef> {
    vec![
        RatioDef::new("The", "The", &["The", "the"]),
        RatioDef::new("I", "I", &["I", "i"]),
        RatioDef::new("OK", "OK", &["OK", "ok", "okay", "Okay", "okies"]),
    ]
}

/// Maps each token to the form that is counted, e.g. lowercase.
pub type Normalizer = Box<dyn Fn(&str) -> String + Send + Sync>;

/// What to calculate and how.
pub struct StatsConfig {
    /// Applied to the text first; `None` if the text is already clean.
    pub cleaner: Option<Cleaner>,
    pub ratios: Vec<RatioDef>,
    /// Applied to tokens before counting frequencies; `None` counts tokens as they are.
    pub normalizer: Option<Normalizer>,
    pub stopword_cutoff: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            cleaner: Some(Cleaner::default()),
            ratios: default_ratios(),
            normalizer: None,
            stopword_cutoff: DEFAULT_STOPWORD_CUTOFF,
        }
    }
}

impl StatsConfig {
    /// Ratio definitions with a valid label; the others are reported and dropped.
    pub fn valid_ratios(&self) -> Vec<&RatioDef> {
        self.ratios
            .iter()
            .filter(|r| {
                if !r.is_valid() {
                    warn!(target: "words750", "skipping the invalid ratio label '{}'", r.label);
                }
                r.is_valid()
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Ratio {
    pub label: String,
    /// `None` if none of the words occur.
    pub value: Option<f64>,
}

/// Statistics that need a [Lexicon].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Enrichment {
    /// Syllables of each known token, in text order.
    pub syllables_per_word: Vec<usize>,
    /// Tokens per part of speech; a token may count for several.
    pub parts_of_speech: BTreeMap<PartOfSpeech, u64>,
    /// Ranked frequencies without the most common words.
    pub content_frequencies: Vec<(String, u64)>,
}

impl Enrichment {
    pub fn mean_syllables(&self) -> Option<f64> {
        mean(&self.syllables_per_word)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WordStatistics {
    pub total_words: u64,
    pub frequency_table: HashMap<String, u64>,
    /// Most frequent first; ties in order of first appearance.
    pub ranked_frequencies: Vec<(String, u64)>,
    pub ratios: Vec<Ratio>,
    /// At least [GOAL] words.
    pub meets_goal: bool,
    /// Lengths of all tokens except hyperlinks, in characters.
    pub word_lengths: Vec<usize>,
    pub profanity_count: u64,
    pub enrichment: Option<Enrichment>,
}

fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
    }
}

impl WordStatistics {
    pub fn frequency(&self, word: &str) -> u64 {
        self.frequency_table.get(word).copied().unwrap_or(0)
    }

    /// Frequency of `word` divided by the total frequency of `words`.
    pub fn ratio(&self, word: &str, words: &[String]) -> Option<f64> {
        let denominator: u64 = words.iter().map(|w| self.frequency(w)).sum();
        if denominator == 0 {
            None
        } else {
            Some(self.frequency(word) as f64 / denominator as f64)
        }
    }

    pub fn ratio_value(&self, label: &str) -> Option<f64> {
        self.ratios.iter().find(|r| r.label == label)?.value
    }

    pub fn mean_word_length(&self) -> Option<f64> {
        mean(&self.word_lengths)
    }

    pub fn most_common(&self, n: usize) -> &[(String, u64)] {
        &self.ranked_frequencies[..n.min(self.ranked_frequencies.len())]
    }
}

/// Frequencies in order of first appearance.
fn count_frequencies<'a>(
    tokens: impl Iterator<Item = &'a str>,
    normalizer: Option<&Normalizer>,
) -> Vec<(String, u64)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();
    for token in tokens {
        let form = match normalizer {
            None => token.to_owned(),
            Some(f) => f(token),
        };
        match index.get(&form) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(form.clone(), counts.len());
                counts.push((form, 1));
            }
        }
    }
    counts
}

fn rank(counts: &[(String, u64)]) -> Vec<(String, u64)> {
    counts
        .iter()
        .cloned()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect_vec()
}

pub fn count_profanities(tokens: &[&str]) -> u64 {
    tokens
        .iter()
        .filter(|t| {
            let t = t.to_lowercase();
            PROFANITIES.iter().any(|p| t.contains(p))
        })
        .count() as u64
}

/// Known words are looked up as they are, then in lowercase.
fn lookup<T>(word: &str, f: impl Fn(&str) -> Option<T>) -> Option<T> {
    f(word).or_else(|| {
        let lower = word.to_lowercase();
        if lower != word { f(lower.as_str()) } else { None }
    })
}

fn enrich(
    tokens: &[&str],
    ranked: &[(String, u64)],
    lexicon: &dyn Lexicon,
    stopword_cutoff: usize,
) -> Enrichment {
    let syllables_per_word = tokens
        .iter()
        .filter_map(|t| lookup(t, |w| lexicon.syllables_for(w).map(|s| s.len())))
        .collect_vec();
    let mut parts_of_speech = BTreeMap::new();
    for t in tokens {
        let pos = lookup(t, |w| {
            let pos = lexicon.parts_of_speech_for(w);
            if pos.is_empty() { None } else { Some(pos) }
        });
        for p in pos.unwrap_or_default() {
            *parts_of_speech.entry(p).or_insert(0) += 1;
        }
    }
    let stopwords: HashSet<&str> = lexicon
        .stopwords_by_frequency()
        .iter()
        .take(stopword_cutoff)
        .map(|w| w.as_str())
        .collect();
    let content_frequencies = ranked
        .iter()
        .filter(|(w, _)| !stopwords.contains(w.to_lowercase().as_str()))
        .cloned()
        .collect_vec();
    Enrichment {
        syllables_per_word,
        parts_of_speech,
        content_frequencies,
    }
}

/// Calculate statistics for one body of text.
pub fn compute(text: &str, config: &StatsConfig, lexicon: Option<&dyn Lexicon>) -> WordStatistics {
    let cleaned;
    let text = match &config.cleaner {
        None => text,
        Some(c) => {
            cleaned = c.clean(text);
            &cleaned
        }
    };
    let tokens = text.split_whitespace().collect_vec();
    let counts = count_frequencies(tokens.iter().copied(), config.normalizer.as_ref());
    let ranked_frequencies = rank(&counts);
    let total_words = tokens.len() as u64;
    let word_lengths = tokens
        .iter()
        .filter(|t| !t.contains("://"))
        .map(|t| t.chars().count())
        .collect_vec();
    let enrichment =
        lexicon.map(|lex| enrich(&tokens, &ranked_frequencies, lex, config.stopword_cutoff));
    let mut stats = WordStatistics {
        total_words,
        frequency_table: counts.into_iter().collect(),
        ranked_frequencies,
        ratios: vec![],
        meets_goal: total_words >= GOAL,
        word_lengths,
        profanity_count: count_profanities(&tokens),
        enrichment,
    };
    stats.ratios = config
        .valid_ratios()
        .into_iter()
        .map(|r| Ratio {
            label: r.label.clone(),
            value: stats.ratio(&r.word, &r.words),
        })
        .collect();
    stats
}

/// Statistics for each entry, in entry order.
pub fn entry_statistics(
    entries: &[Entry],
    config: &StatsConfig,
    lexicon: Option<&dyn Lexicon>,
) -> Vec<WordStatistics> {
    let stats = parallelism::map_parallel(entries, |e| compute(&e.text, config, lexicon));
    debug!(target: "words750", "statistics for {} entries", stats.len());
    stats
}

/// Statistics for all entries taken together.
pub fn aggregate_statistics(
    entries: &[Entry],
    config: &StatsConfig,
    lexicon: Option<&dyn Lexicon>,
) -> WordStatistics {
    // Line breaks disappear in cleaning, so separate entries with a space.
    let text = entries.iter().map(|e| e.text.as_str()).join(" ");
    compute(&text, config, lexicon)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexicon::MobyLexicon;

    fn raw_config() -> StatsConfig {
        StatsConfig {
            cleaner: None,
            ..StatsConfig::default()
        }
    }

    #[test]
    fn word_count_is_token_count() {
        let config = raw_config();
        for text in ["", "one", "a b  c\n d", " lead and trail "] {
            let s = compute(text, &config, None);
            assert_eq!(s.total_words, text.split_whitespace().count() as u64);
        }
    }

    #[test]
    fn ratio_example() {
        let s = compute("The the THE blah", &raw_config(), None);
        assert_eq!(s.frequency("The"), 1);
        assert_eq!(s.frequency("the"), 1);
        assert_eq!(s.frequency("THE"), 1);
        assert_eq!(s.ratio_value("The"), Some(0.5));
        assert_eq!(s.ratio_value("I"), None);
        assert_eq!(s.ratio_value("OK"), None);
    }

    #[test]
    fn ratio_variants() {
        let s = compute("Blah blah blah blah", &raw_config(), None);
        let words = |w: &[&str]| w.iter().map(|&x| x.to_owned()).collect_vec();
        assert_eq!(s.ratio("Blah", &words(&["bla", "blah"])), Some(1.0 / 3.0));
        assert_eq!(s.ratio("Blah", &words(&["Blah", "bla", "blah"])), Some(0.25));
        assert_eq!(s.ratio("Blah", &words(&["Blah"])), Some(1.0));
        assert_eq!(s.ratio("Blah", &words(&["foo"])), None);
    }

    #[test]
    fn invalid_ratio_labels_are_skipped() {
        let config = StatsConfig {
            cleaner: None,
            ratios: vec![
                RatioDef::new("9lives", "a", &["a"]),
                RatioDef::new("", "a", &["a"]),
                RatioDef::new("_a", "a", &["a", "A"]),
            ],
            ..StatsConfig::default()
        };
        let s = compute("a A a", &config, None);
        assert_eq!(
            s.ratios,
            [Ratio {
                label: "_a".to_owned(),
                value: Some(2.0 / 3.0)
            }]
        );
    }

    #[test]
    fn ranked_frequencies() {
        let s = compute("b a c a b a d", &raw_config(), None);
        assert_eq!(
            s.ranked_frequencies,
            [
                ("a".to_owned(), 3),
                ("b".to_owned(), 2),
                ("c".to_owned(), 1),
                ("d".to_owned(), 1)
            ]
        );
        assert_eq!(s.most_common(1), [("a".to_owned(), 3)]);
        assert_eq!(s.most_common(10).len(), 4);
    }

    #[test]
    fn normalizer() {
        let config = StatsConfig {
            cleaner: None,
            normalizer: Some(Box::new(|w: &str| w.to_lowercase())),
            ..StatsConfig::default()
        };
        let s = compute("The the THE blah", &config, None);
        assert_eq!(s.frequency("the"), 3);
        assert_eq!(s.frequency("The"), 0);
        assert_eq!(s.total_words, 4);
    }

    #[test]
    fn cleaning() {
        let s = compute("it's late, very late.", &StatsConfig::default(), None);
        assert_eq!(s.total_words, 5);
        assert_eq!(s.frequency("late"), 2);
        assert_eq!(s.frequency("is"), 1);
    }

    #[test]
    fn goal() {
        let config = raw_config();
        assert!(!compute(&"w ".repeat(749), &config, None).meets_goal);
        assert!(compute(&"w ".repeat(750), &config, None).meets_goal);
    }

    #[test]
    fn word_lengths() {
        let s = compute("ab abcd http://x.org", &raw_config(), None);
        assert_eq!(s.word_lengths, [2, 4]);
        assert_eq!(s.mean_word_length(), Some(3.0));
        assert_eq!(compute("", &raw_config(), None).mean_word_length(), None);
    }

    #[test]
    fn profanities() {
        assert_eq!(count_profanities(&["Damnit", "crap", "scrappy", "nice"]), 3);
        assert_eq!(count_profanities(&[]), 0);
    }

    #[test]
    fn enrichment() {
        let lex = MobyLexicon::from_sources(
            "the\ncat\nhap\u{a5}py\n",
            "the\u{d7}D\rcat\u{d7}N\rhappy\u{d7}AN\r",
            "header\nthe\na\n",
            false,
        );
        let s = compute("The happy cat the zebra", &raw_config(), Some(&lex));
        let e = s.enrichment.unwrap();
        assert_eq!(e.syllables_per_word, [1, 2, 1, 1]);
        assert_eq!(e.mean_syllables(), Some(1.25));
        assert_eq!(e.parts_of_speech[&PartOfSpeech::DefiniteArticle], 2);
        assert_eq!(e.parts_of_speech[&PartOfSpeech::Noun], 2);
        assert_eq!(e.parts_of_speech[&PartOfSpeech::Adjective], 1);
        assert_eq!(
            e.content_frequencies,
            [
                ("happy".to_owned(), 1),
                ("cat".to_owned(), 1),
                ("zebra".to_owned(), 1)
            ]
        );
        assert_eq!(compute("cat", &raw_config(), None).enrichment, None);
    }

    #[test]
    fn stopword_cutoff() {
        let lex = MobyLexicon::from_sources("", "", "header\nthe\na\n", false);
        let config = StatsConfig {
            cleaner: None,
            stopword_cutoff: 1,
            ..StatsConfig::default()
        };
        let s = compute("a the a", &config, Some(&lex));
        assert_eq!(
            s.enrichment.unwrap().content_frequencies,
            [("a".to_owned(), 2)]
        );
    }

    #[test]
    fn per_entry_and_aggregate() {
        use crate::input::Metadata;
        use chrono::NaiveDate;
        let entries = (1..=5)
            .map(|d| Entry {
                date: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
                word_count: d as u64,
                minutes: 1,
                metadata: Metadata::new(),
                text: "word ".repeat(d as usize),
            })
            .collect_vec();
        let config = StatsConfig::default();
        let per_entry = entry_statistics(&entries, &config, None);
        assert_eq!(
            per_entry.iter().map(|s| s.total_words).collect_vec(),
            [1, 2, 3, 4, 5]
        );
        let all = aggregate_statistics(&entries, &config, None);
        assert_eq!(all.total_words, 15);
        assert_eq!(all.frequency("word"), 15);
    }
}
