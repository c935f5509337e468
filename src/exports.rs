//! Finding and reading monthly export files downloaded from the site.
//!
//! The site names its exports like `750 Words-export-mar-2013.txt`; downloading
//! the same month again gives e.g. `750 Words-export-mar-2013 (1).txt`. The
//! largest file of each month is assumed to be the most complete one.

use crate::errors::{self, Result};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static EXPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^750 Words-export-([A-Za-z]{3})-(\d{4})")
        .expect("EXPORT_PATTERN regex is invalid")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub type YearMonth = (i32, u32);

/// Year and month of an export file, from its name.
pub fn export_month(file_name: &str) -> Option<YearMonth> {
    let caps = EXPORT_PATTERN.captures(file_name)?;
    let month = caps[1].to_lowercase();
    let Some(i) = MONTHS.iter().position(|&m| m == month) else {
        warn!(target: "words750", "{file_name}: unknown month '{}'", &caps[1]);
        return None;
    };
    let year = caps[2].parse().ok()?;
    Some((year, i as u32 + 1))
}

/// Export files in `dir`, one per month, in chronological order.
pub fn find_export_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut best: BTreeMap<YearMonth, (u64, PathBuf)> = BTreeMap::new();
    for dirent in fs::read_dir(dir)? {
        let dirent = dirent?;
        let name = dirent.file_name();
        let Some(ym) = name.to_str().and_then(export_month) else {
            continue;
        };
        let size = dirent.metadata()?.len();
        let path = dirent.path();
        debug!(target: "words750", "found {} ({size} bytes)", path.display());
        if best.get(&ym).is_none_or(|(s, _)| size > *s) {
            best.insert(ym, (size, path));
        }
    }
    info!(target: "words750", "{}: {} monthly exports", dir.display(), best.len());
    Ok(best.into_values().map(|(_, p)| p).collect())
}

/// Concatenate the given files.
pub fn read_exports(files: &[PathBuf]) -> Result<String> {
    let mut text = String::new();
    for file in files {
        info!(target: "words750", "read: {}", file.display());
        let content = fs::read_to_string(file)
            .map_err(|e| errors::invalid_input(format!("{}: {e}", file.display())))?;
        text.push_str(&content);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok(text)
}

/// Read all exports from a directory, or a single export file.
pub fn read_path(path: &Path) -> Result<String> {
    if path.is_dir() {
        let files = find_export_files(path)?;
        if files.is_empty() {
            return Err(errors::invalid_input(format!(
                "{}: no export files found",
                path.display()
            )));
        }
        read_exports(&files)
    } else {
        read_exports(&[path.to_path_buf()])
    }
}
