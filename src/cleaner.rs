//! Text normalization before word statistics are computed.

use regex::Regex;
use std::sync::LazyLock;

/// Full URLs, `www.` addresses and bare domain names.
static HYPERLINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:[a-z][a-z0-9+.-]*://|www\.)[^\s<>"]+|\b(?:[a-z0-9-]+\.)+(?:com|org|net|edu|gov|info|biz|io|co|uk|us|au|ca|de|fr|me)\b(?:/[^\s<>"]*)?"#,
    )
    .expect("HYPERLINK_PATTERN regex is invalid")
});

/// Characters replaced by a space.
pub const PUNCTUATION: &str = r#"~`!@#$%^&*()_-+=[]\{}|;:",./<>?"#;

/// Characters removed altogether.
pub const LINE_BREAKS: &str = "\n\r";

/// Text cleaning settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cleaner {
    /// Literal replacements, applied in order after punctuation has been removed.
    pub substitutions: Vec<(String, String)>,
}

impl Default for Cleaner {
    fn default() -> Self {
        Cleaner {
            substitutions: vec![("it's".to_owned(), "it is".to_owned())],
        }
    }
}

impl Cleaner {
    /// A cleaner without substitutions.
    pub fn without_substitutions() -> Self {
        Cleaner {
            substitutions: vec![],
        }
    }

    pub fn clean(&self, text: &str) -> String {
        let text = remove_hyperlinks(text);
        let text = remove_punctuation(&text);
        apply_substitutions(&text, &self.substitutions)
    }
}

pub fn remove_hyperlinks(text: &str) -> String {
    HYPERLINK_PATTERN.replace_all(text, " ").into_owned()
}

pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !LINE_BREAKS.contains(*c))
        .map(|c| if PUNCTUATION.contains(c) { ' ' } else { c })
        .collect()
}

/// Plain substring replacement; `"bit's"` becomes `"bit is"` just like `"it's"`.
pub fn apply_substitutions(text: &str, substitutions: &[(String, String)]) -> String {
    let mut text = text.to_owned();
    for (old, new) in substitutions {
        text = text.replace(old.as_str(), new);
    }
    text
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn punctuation_becomes_space() {
        assert_eq!(remove_punctuation("a,b.c"), "a b c");
        assert_eq!(remove_punctuation("(x) [y] {z}"), " x   y   z ");
        assert_eq!(remove_punctuation(r"a\b|c"), "a b c");
        assert_eq!(remove_punctuation("don't"), "don't");
    }

    #[test]
    fn line_breaks_are_removed() {
        assert_eq!(remove_punctuation("one\r\ntwo"), "onetwo");
        assert_eq!(remove_punctuation("one.\ntwo"), "one two");
    }

    #[test]
    fn hyperlinks() {
        assert_eq!(
            remove_hyperlinks("see http://example.com/a?b=c now"),
            "see   now"
        );
        assert_eq!(remove_hyperlinks("at www.example.org."), "at  ");
        assert_eq!(remove_hyperlinks("visit 750words.com today"), "visit   today");
        assert_eq!(remove_hyperlinks("e.g. this is fine"), "e.g. this is fine");
    }

    #[test]
    fn hyperlinks_before_punctuation() {
        let c = Cleaner::without_substitutions();
        assert_eq!(
            c.clean("read https://en.wikipedia.org/wiki/Rust then"),
            "read   then"
        );
    }

    #[test]
    fn substitutions_are_literal() {
        let c = Cleaner::default();
        assert_eq!(c.clean("it's late"), "it is late");
        assert_eq!(c.clean("the bit's edge"), "the bit is edge");
        assert_eq!(c.clean("It's"), "It's");
    }

    #[test]
    fn clean_is_idempotent() {
        let c = Cleaner::default();
        for text in [
            "Hello, world! it's me.\nSee www.example.com/x or mail me@example.org",
            "(nested [brackets]) and -- dashes -- and 10:30",
            "plain words only",
            "",
        ] {
            let once = c.clean(text);
            assert_eq!(c.clean(&once), once);
        }
    }
}
