pub mod cleaner;
pub mod driver;
pub mod errors;
pub mod exports;
mod information;
pub mod input;
pub mod lexicon;
pub mod metadata;
pub mod output;
mod parallelism;
pub mod parser;
pub mod streak;
pub mod wordstats;
