//! Parser for the 750words.com monthly export format.
//!
//! An export is a sequence of blocks of the form
//!
//! ```text
//! ------ ENTRY ------
//! Date: 2013-03-01
//! Words: 812
//! Minutes: 23
//! free-form text...
//! ```
//!
//! Several monthly exports can simply be concatenated, as long as they are in
//! chronological order.

use crate::errors::{self, Result};
use crate::input::{Entry, Journal, Metadata};
use crate::metadata;
use chrono::NaiveDate;
use log::{debug, info};

/// The line that starts each entry.
pub const ENTRY_DELIMITER: &str = "------ ENTRY ------";

/// Prefix of the generated entry headings in the display text.
pub const DEFAULT_HEADER_PREFIX: &str = "## ";

const DATE_FORMAT: &str = "%Y-%m-%d";

struct Header {
    date: NaiveDate,
    word_count: u64,
    minutes: u64,
}

struct OpenEntry<'a> {
    header: Header,
    metadata: Metadata,
    lines: Vec<&'a str>,
}

impl OpenEntry<'_> {
    fn feed_line(&mut self, line: &str) {
        if let Some(tag) = metadata::classify_line(line) {
            let value = tag.to_tag_value();
            self.metadata.entry(tag.key).or_default().push(value);
        }
    }

    fn finish(self) -> Entry {
        Entry {
            date: self.header.date,
            word_count: self.header.word_count,
            minutes: self.header.minutes,
            metadata: self.metadata,
            text: self.lines.join("\n"),
        }
    }
}

/// The value part of a `LABEL: value` header line.
fn header_value<'a>(lines: &[&'a str], i: usize) -> Result<&'a str> {
    match lines[i].split_once(':') {
        Some((_, value)) => Ok(value.trim()),
        None => Err(errors::parse_error(
            i + 1,
            format!("expected 'LABEL: value', got '{}'", lines[i]),
        )),
    }
}

fn header_number(lines: &[&str], i: usize) -> Result<u64> {
    let value = header_value(lines, i)?;
    value
        .parse()
        .map_err(|_| errors::parse_error(i + 1, format!("expected a number, got '{value}'")))
}

fn header_date(lines: &[&str], i: usize) -> Result<NaiveDate> {
    let value = header_value(lines, i)?;
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| errors::parse_error(i + 1, format!("expected a date, got '{value}'")))
}

/// Read the three header lines after the delimiter on line `i`.
/// Returns `None` for placeholder entries (zero minutes).
fn read_header(lines: &[&str], i: usize) -> Result<Option<Header>> {
    if i + 3 >= lines.len() {
        return Err(errors::parse_error(
            i + 1,
            "entry header is truncated".to_owned(),
        ));
    }
    let minutes = header_number(lines, i + 3)?;
    if minutes == 0 {
        return Ok(None);
    }
    Ok(Some(Header {
        date: header_date(lines, i + 1)?,
        word_count: header_number(lines, i + 2)?,
        minutes,
    }))
}

fn display_header(header: &Header, header_prefix: &str) -> [String; 3] {
    [
        format!("<a id=\"{}\"></a>", header.date.format(DATE_FORMAT)),
        format!("{header_prefix}{}", header.date.format("%A %B %d, %Y")),
        format!(
            "<i>Entry: {} words, {} mins</i>",
            header.word_count, header.minutes
        ),
    ]
}

/// Parse export text into entries and a Markdown rendering for display.
///
/// Entries with zero minutes are placeholders for days without writing;
/// they are left out of the entries, and their lines, up to the next
/// delimiter, are passed through to the display text unchanged.
pub fn parse_export(raw: &str, header_prefix: &str) -> Result<Journal> {
    let lines = raw.lines().collect::<Vec<_>>();
    let mut display: Vec<String> = Vec::with_capacity(lines.len());
    let mut entries = Vec::new();
    let mut open: Option<OpenEntry> = None;
    let mut skipped = 0;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line == ENTRY_DELIMITER {
            if let Some(e) = open.take() {
                entries.push(e.finish());
            }
            match read_header(&lines, i)? {
                None => {
                    debug!(target: "words750", "line {}: skipping entry with zero minutes", i + 1);
                    skipped += 1;
                    display.extend(lines[i..i + 4].iter().map(|&l| l.to_owned()));
                }
                Some(header) => {
                    display.extend(display_header(&header, header_prefix));
                    open = Some(OpenEntry {
                        header,
                        metadata: Metadata::new(),
                        lines: vec![],
                    });
                }
            }
            i += 4;
            continue;
        }
        if let Some(e) = open.as_mut() {
            e.feed_line(line);
            e.lines.push(line);
        }
        display.push(line.to_owned());
        i += 1;
    }
    if let Some(e) = open.take() {
        entries.push(e.finish());
    }
    info!(
        target: "words750",
        "parsed {} entries, skipped {} empty entries",
        entries.len(),
        skipped
    );
    Ok(Journal {
        display_text: display.join("\n"),
        entries,
    })
}
