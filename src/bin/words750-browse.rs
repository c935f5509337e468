use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use std::path::PathBuf;
use words750::exports;
use words750::metadata::{self, TagRecord};
use words750::output;
use words750::parser::{self, DEFAULT_HEADER_PREFIX};

/// Browse the metadata tags of your entries
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Export file, or a directory of monthly export files
    path: PathBuf,
}

fn describe(key: &str, records: &[TagRecord]) -> String {
    let options = textwrap::Options::new(70).subsequent_indent("           ");
    let mut lines = vec![];
    let mut prev = None;
    for r in records {
        let date = if prev == Some(r.date) {
            String::new()
        } else {
            output::pretty_date(&r.date)
        };
        prev = Some(r.date);
        lines.push(textwrap::fill(&format!("{date:>10} {}", r.value), &options));
    }
    match metadata::numeric_series(records) {
        Some(points) => {
            let values = points.iter().map(|p| p.1).collect_vec();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            lines.push(format!(
                "{key}: {} numeric values, min {min}, max {max}, mean {mean:.2}",
                values.len()
            ));
        }
        None => lines.push(format!("{key}: not a numeric series")),
    }
    lines.join("\n")
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("words750-browse")?;
    log::info(format!("Reading {}...", args.path.display()))?;
    let raw_text = exports::read_path(&args.path)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("cannot read {}", args.path.display()))?;
    let journal = parser::parse_export(&raw_text, DEFAULT_HEADER_PREFIX)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("cannot parse {}", args.path.display()))?;
    log::info(format!("{} entries", journal.entries.len()))?;
    let all = metadata::collect_metadata(&journal.entries);
    if all.is_empty() {
        cliclack::outro("No metadata tags found.")?;
        return Ok(());
    }
    loop {
        let mut items = vec![];
        for (key, records) in &all {
            items.push((Some(key.as_str()), format!("{key} ({} values)", records.len()), ""));
        }
        items.push((None, "Quit".to_owned(), ""));
        let choice = cliclack::select("Which tag?").items(&items).interact()?;
        match choice {
            None => break,
            Some(key) => {
                let mut records = all[key].clone();
                records.sort_by(|a, b| b.date.cmp(&a.date));
                cliclack::note(key, describe(key, &records))?;
            }
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
