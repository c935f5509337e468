//! Optional linguistic data: syllables, parts of speech and common words.
//!
//! [MobyLexicon] reads the word lists of the public-domain Moby project.
//! The data is loaded once, at startup, and only read afterwards.

use crate::errors::{self, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::{fmt, fs};

/// Hyphenation list, relative to the Moby root directory.
pub const HYPHENATION_FILE: &str = "mhyph/mhyph.txt";
/// Parts-of-speech list, relative to the Moby root directory.
pub const PARTS_OF_SPEECH_FILE: &str = "mpos/mobyposi.i";
/// Words in order of decreasing frequency, relative to the Moby root directory.
pub const FREQUENCY_FILE: &str = "mwords/10001fr.equ";

const HYPHEN: char = '\u{a5}';
const POS_DELIMITER: char = '\u{d7}';

/// Lookup interface used for enriching word statistics.
pub trait Lexicon: Sync {
    /// Syllables of a word, or `None` if the word is unknown.
    fn syllables_for(&self, word: &str) -> Option<&[String]>;
    /// Parts of speech of a word; empty if the word is unknown.
    fn parts_of_speech_for(&self, word: &str) -> Vec<PartOfSpeech>;
    /// Common words, most frequent first.
    fn stopwords_by_frequency(&self) -> &[String];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Plural,
    NounPhrase,
    VerbParticiple,
    VerbTransitive,
    VerbIntransitive,
    Adjective,
    Adverb,
    Conjunction,
    Preposition,
    Interjection,
    Pronoun,
    DefiniteArticle,
    IndefiniteArticle,
    Nominative,
}

impl PartOfSpeech {
    /// Decode a one-letter Moby code.
    pub fn from_code(code: char) -> Option<PartOfSpeech> {
        use PartOfSpeech::*;
        Some(match code {
            'N' => Noun,
            'p' => Plural,
            'h' => NounPhrase,
            'V' => VerbParticiple,
            't' => VerbTransitive,
            'i' => VerbIntransitive,
            'A' => Adjective,
            'v' => Adverb,
            'C' => Conjunction,
            'P' => Preposition,
            '!' => Interjection,
            'r' => Pronoun,
            'D' => DefiniteArticle,
            'I' => IndefiniteArticle,
            'o' => Nominative,
            _ => return None,
        })
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PartOfSpeech::*;
        let s = match self {
            Noun => "noun",
            Plural => "plural",
            NounPhrase => "noun phrase",
            VerbParticiple => "verb (participle)",
            VerbTransitive => "verb (transitive)",
            VerbIntransitive => "verb (intransitive)",
            Adjective => "adjective",
            Adverb => "adverb",
            Conjunction => "conjunction",
            Preposition => "preposition",
            Interjection => "interjection",
            Pronoun => "pronoun",
            DefiniteArticle => "definite article",
            IndefiniteArticle => "indefinite article",
            Nominative => "nominative",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuffixGuess {
    /// The word is the plural of a noun.
    PluralOfNoun,
    /// The word has the same parts of speech as its root.
    SameAsRoot,
}

/// Guess the parts of speech of an unknown word from a known root.
///
/// These guesses are crude: for example, `this` is taken as the plural
/// of `thi` if the latter happens to be listed as a noun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub guess: SuffixGuess,
}

/// Suffix rules in the order in which they are tried.
pub const SUFFIX_RULES: [SuffixRule; 5] = [
    SuffixRule {
        suffix: "s",
        guess: SuffixGuess::PluralOfNoun,
    },
    SuffixRule {
        suffix: "ed",
        guess: SuffixGuess::SameAsRoot,
    },
    SuffixRule {
        suffix: "ing",
        guess: SuffixGuess::SameAsRoot,
    },
    SuffixRule {
        suffix: "ly",
        guess: SuffixGuess::SameAsRoot,
    },
    SuffixRule {
        suffix: "ic",
        guess: SuffixGuess::SameAsRoot,
    },
];

impl SuffixRule {
    pub fn root<'a>(&self, word: &'a str) -> Option<&'a str> {
        word.strip_suffix(self.suffix).filter(|r| !r.is_empty())
    }

    /// Apply the rule, given the exact lookup for roots.
    pub fn apply<'a, F>(&self, word: &str, exact: F) -> Option<Vec<PartOfSpeech>>
    where
        F: Fn(&str) -> Option<&'a [PartOfSpeech]>,
    {
        let root_pos = exact(self.root(word)?)?;
        match self.guess {
            SuffixGuess::PluralOfNoun => {
                if root_pos.contains(&PartOfSpeech::Noun) {
                    Some(vec![PartOfSpeech::Plural])
                } else {
                    None
                }
            }
            SuffixGuess::SameAsRoot => Some(root_pos.to_vec()),
        }
    }
}

/// Moby word lists.
#[derive(Default)]
pub struct MobyLexicon {
    syllables: HashMap<String, Vec<String>>,
    parts_of_speech: HashMap<String, Vec<PartOfSpeech>>,
    by_frequency: Vec<String>,
    guess_suffixes: bool,
}

/// The Moby files are in Latin-1.
fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| errors::invalid_input(format!("{}: {e}", path.display())))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

impl MobyLexicon {
    /// Load all three word lists from the Moby root directory.
    pub fn load(root: &Path, guess_suffixes: bool) -> Result<MobyLexicon> {
        let path = root.join(HYPHENATION_FILE);
        info!(target: "words750", "loading hyphenation data from {}", path.display());
        let hyphenation = read_latin1(&path)?;
        let path = root.join(PARTS_OF_SPEECH_FILE);
        info!(target: "words750", "loading parts-of-speech data from {}", path.display());
        let pos = read_latin1(&path)?;
        let path = root.join(FREQUENCY_FILE);
        info!(target: "words750", "loading word frequency data from {}", path.display());
        let frequency = read_latin1(&path)?;
        Ok(MobyLexicon::from_sources(
            &hyphenation,
            &pos,
            &frequency,
            guess_suffixes,
        ))
    }

    /// Build a lexicon from the contents of the three word lists.
    pub fn from_sources(
        hyphenation: &str,
        pos: &str,
        frequency: &str,
        guess_suffixes: bool,
    ) -> MobyLexicon {
        let lexicon = MobyLexicon {
            syllables: parse_hyphenation(hyphenation),
            parts_of_speech: parse_parts_of_speech(pos),
            by_frequency: parse_frequency(frequency),
            guess_suffixes,
        };
        info!(
            target: "words750",
            "lexicon: {} hyphenated words, {} words with parts of speech, {} frequent words",
            lexicon.syllables.len(),
            lexicon.parts_of_speech.len(),
            lexicon.by_frequency.len()
        );
        lexicon
    }

    fn exact_pos(&self, word: &str) -> Option<&[PartOfSpeech]> {
        self.parts_of_speech.get(word).map(|v| v.as_slice())
    }
}

impl Lexicon for MobyLexicon {
    fn syllables_for(&self, word: &str) -> Option<&[String]> {
        self.syllables.get(word).map(|v| v.as_slice())
    }

    fn parts_of_speech_for(&self, word: &str) -> Vec<PartOfSpeech> {
        if let Some(pos) = self.exact_pos(word) {
            return pos.to_vec();
        }
        if self.guess_suffixes {
            for rule in &SUFFIX_RULES {
                if let Some(pos) = rule.apply(word, |w| self.exact_pos(w)) {
                    return pos;
                }
            }
        }
        vec![]
    }

    fn stopwords_by_frequency(&self) -> &[String] {
        &self.by_frequency
    }
}

/// One word per line, syllables separated by `¥`.
fn parse_hyphenation(data: &str) -> HashMap<String, Vec<String>> {
    data.lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            let parts = l.split(HYPHEN).map(|p| p.to_owned()).collect::<Vec<_>>();
            (parts.concat(), parts)
        })
        .collect()
}

/// Records `word×codes`, separated by carriage returns.
fn parse_parts_of_speech(data: &str) -> HashMap<String, Vec<PartOfSpeech>> {
    let mut map = HashMap::new();
    for (i, record) in data
        .split(['\r', '\n'])
        .filter(|r| r.contains(POS_DELIMITER))
        .enumerate()
    {
        let Some((word, codes)) = record.split_once(POS_DELIMITER) else {
            continue;
        };
        let pos = codes
            .chars()
            .map(PartOfSpeech::from_code)
            .collect::<Option<Vec<_>>>();
        match pos {
            Some(pos) => {
                map.insert(word.to_owned(), pos);
            }
            None => warn!(target: "words750", "record {}: unknown part of speech in '{record}'", i + 1),
        }
    }
    map
}

/// A header line, then one word per line.
fn parse_frequency(data: &str) -> Vec<String> {
    data.lines()
        .skip(1)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_owned())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const HYPH: &str = "cat\nhap\u{a5}py\nun\u{a5}hap\u{a5}pi\u{a5}ness\n";
    const POS: &str = "cat\u{d7}N\rhappy\u{d7}A\rwalk\u{d7}Vti\rthi\u{d7}N\rthe\u{d7}D\rodd\u{d7}Q\r";
    const FREQ: &str = "header\nthe\nof\n and \n\n";

    fn lexicon(guess_suffixes: bool) -> MobyLexicon {
        MobyLexicon::from_sources(HYPH, POS, FREQ, guess_suffixes)
    }

    #[test]
    fn syllables() {
        let lex = lexicon(false);
        assert_eq!(lex.syllables_for("happy").unwrap(), ["hap", "py"]);
        assert_eq!(lex.syllables_for("unhappiness").unwrap().len(), 4);
        assert_eq!(lex.syllables_for("cat").unwrap(), ["cat"]);
        assert_eq!(lex.syllables_for("dog"), None);
    }

    #[test]
    fn parts_of_speech_exact() {
        use PartOfSpeech::*;
        let lex = lexicon(false);
        assert_eq!(lex.parts_of_speech_for("cat"), [Noun]);
        assert_eq!(
            lex.parts_of_speech_for("walk"),
            [VerbParticiple, VerbTransitive, VerbIntransitive]
        );
        assert!(lex.parts_of_speech_for("cats").is_empty());
        assert!(lex.parts_of_speech_for("odd").is_empty());
    }

    #[test]
    fn parts_of_speech_guessed() {
        use PartOfSpeech::*;
        let lex = lexicon(true);
        assert_eq!(lex.parts_of_speech_for("cats"), [Plural]);
        assert_eq!(
            lex.parts_of_speech_for("walked"),
            [VerbParticiple, VerbTransitive, VerbIntransitive]
        );
        assert_eq!(lex.parts_of_speech_for("walking").len(), 3);
        assert_eq!(lex.parts_of_speech_for("happyly"), [Adjective]);
        assert_eq!(lex.parts_of_speech_for("this"), [Plural]);
        assert!(lex.parts_of_speech_for("happys").is_empty());
        assert!(lex.parts_of_speech_for("s").is_empty());
    }

    #[test]
    fn suffix_rules() {
        let rule = SUFFIX_RULES[0];
        assert_eq!(rule.root("cats"), Some("cat"));
        assert_eq!(rule.root("s"), None);
        assert_eq!(rule.root("cat"), None);
        let rule = SUFFIX_RULES[2];
        assert_eq!(rule.root("walking"), Some("walk"));
        let nouns = [PartOfSpeech::Noun];
        let lookup = |w: &str| if w == "walk" { Some(&nouns[..]) } else { None };
        assert_eq!(rule.apply("walking", lookup), Some(vec![PartOfSpeech::Noun]));
        assert_eq!(rule.apply("talking", lookup), None);
    }

    #[test]
    fn stopwords() {
        let lex = lexicon(false);
        assert_eq!(lex.stopwords_by_frequency(), ["the", "of", "and"]);
    }

    #[test]
    fn part_of_speech_names() {
        assert_eq!(format!("{}", PartOfSpeech::VerbTransitive), "verb (transitive)");
        assert_eq!(PartOfSpeech::from_code('!'), Some(PartOfSpeech::Interjection));
        assert_eq!(PartOfSpeech::from_code('x'), None);
    }
}
