use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use std::path::PathBuf;
use std::{error, fs, io, process};
use words750::driver::{self, DriverArgs};
use words750::errors::Result;
use words750::lexicon::{Lexicon, MobyLexicon};
use words750::output::{self, OError, Output};
use words750::parser::DEFAULT_HEADER_PREFIX;
use words750::wordstats::{DEFAULT_STOPWORD_CUTOFF, StatsConfig};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Export file, or a directory of monthly export files
    path: PathBuf,
    /// Output file (JSON)
    #[arg(long)]
    outfile: Option<String>,
    /// Root directory of the Moby word lists
    #[arg(long)]
    moby: Option<PathBuf>,
    /// Guess parts of speech of unknown words from their suffixes
    #[arg(long)]
    guess_suffixes: bool,
    /// Number of most frequent words ignored as stop words
    #[arg(long, default_value_t = DEFAULT_STOPWORD_CUTOFF)]
    stopword_cutoff: usize,
    /// Count words case-insensitively
    #[arg(long)]
    ignore_case: bool,
    /// Number of most common words to show
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn write_output(args: &Args, filename: &str, output: &Output) -> Result<()> {
    info!(target: "words750", "write: {filename}");
    let file = fs::File::create(filename)?;
    let writer = io::BufWriter::new(file);
    if args.compact {
        serde_json::to_writer(writer, output)?;
    } else {
        serde_json::to_writer_pretty(writer, output)?;
    }
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    let raw_text = words750::exports::read_path(&args.path)?;
    let lexicon = match &args.moby {
        None => None,
        Some(root) => Some(MobyLexicon::load(root, args.guess_suffixes)?),
    };
    let mut stats = StatsConfig {
        stopword_cutoff: args.stopword_cutoff,
        ..StatsConfig::default()
    };
    if args.ignore_case {
        stats.normalizer = Some(Box::new(|w: &str| w.to_lowercase()));
    }
    let driver_args = DriverArgs {
        header_prefix: DEFAULT_HEADER_PREFIX,
        stats,
        lexicon: lexicon.as_ref().map(|l| l as &dyn Lexicon),
    };
    let journal = driver::parse(&driver_args, &raw_text)?;
    let output = driver::calc(&driver_args, &journal);
    println!("{}", output::streak_summary(&output.streaks));
    println!();
    println!("{}", output::stats_summary(&output.total, args.top));
    if let Some(filename) = &args.outfile {
        write_output(args, filename, &output)?;
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
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
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "words750", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "words750", "{e}");
                        error!(target: "words750", "{e2}");
                    }
                },
                None => error!(target: "words750", "{e}"),
            }
            process::exit(1);
        }
    }
}
