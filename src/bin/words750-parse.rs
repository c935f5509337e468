use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use std::path::PathBuf;
use std::{fs, io, process};
use words750::driver::{self, DriverArgs};
use words750::errors::{self, Result};
use words750::exports;
use words750::parser::DEFAULT_HEADER_PREFIX;
use words750::wordstats::StatsConfig;

/// Convert exports into Markdown and JSON
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Export file, or a directory of monthly export files
    path: PathBuf,
    /// Output file for the entries (JSON)
    #[arg(long)]
    json: Option<String>,
    /// Output file for the display text (Markdown)
    #[arg(long)]
    markdown: Option<String>,
    /// Prefix of the entry headings in the Markdown file
    #[arg(long, default_value = DEFAULT_HEADER_PREFIX)]
    header_prefix: String,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn process(args: &Args) -> Result<()> {
    if args.json.is_none() && args.markdown.is_none() {
        return Err(errors::invalid_argument(
            "nothing to do, give --json or --markdown".to_owned(),
        ));
    }
    let raw_text = exports::read_path(&args.path)?;
    let driver_args = DriverArgs {
        header_prefix: &args.header_prefix,
        stats: StatsConfig::default(),
        lexicon: None,
    };
    let journal = driver::parse(&driver_args, &raw_text)?;
    if let Some(filename) = &args.markdown {
        info!(target: "words750", "write: {filename}");
        fs::write(filename, &journal.display_text)?;
    }
    if let Some(filename) = &args.json {
        info!(target: "words750", "write: {filename}");
        let file = fs::File::create(filename)?;
        let writer = io::BufWriter::new(file);
        if args.compact {
            serde_json::to_writer(writer, &journal.entries)?;
        } else {
            serde_json::to_writer_pretty(writer, &journal.entries)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            error!(target: "words750", "{e}");
            process::exit(1);
        }
    }
}
