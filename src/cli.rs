//! Command-line interface definition for reserved-filter
//!
//! Both inputs default to the conventional file names in the working
//! directory, so a bare invocation needs no arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::word::MAX_WORD_SIZE;

/// Conventional name of the reserved-word file
pub const DEFAULT_RESERVED_FILE: &str = "FinalReservedWords.txt";

/// Conventional name of the text to parse
pub const DEFAULT_TEXT_FILE: &str = "FinalExamTextToParse.txt";

/// Report every word of a text that is not on a reserved-word list
///
/// Loads the reserved words, sorts them, then prints each word of the text
/// that is missing from the list, one per line, in the order it appears.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reserved-filter",
    author = "m0h1nd4",
    version,
    about = "Report every word of a text that is not on a reserved-word list",
    long_about = r#"
Loads up to 50 reserved words (20 characters each), sorts them, and streams
the text file. Letters are folded to lowercase, digits and punctuation are
dropped, and whitespace or '-' ends a word. Each word that is not reserved is
printed on its own line, duplicates included.

EXAMPLES:
    # Use the conventional file names in the current directory
    reserved-filter

    # Explicit inputs
    reserved-filter -r keywords.txt -t essay.txt

    # Clip overlong words instead of skipping them
    reserved-filter --overlong truncate

    # Treat an overlong word as a fatal error
    reserved-filter --overlong abort

    # Where does a word land in the sorted list?
    reserved-filter --lookup banana
"#
)]
pub struct Args {
    /// File of whitespace-separated reserved words
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_RESERVED_FILE)]
    pub reserved: PathBuf,

    /// Text file to filter
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_TEXT_FILE)]
    pub text: PathBuf,

    /// What to do with words longer than 20 characters
    #[arg(long, value_enum, default_value_t = OverflowPolicy::Skip)]
    pub overlong: OverflowPolicy,

    /// Report the position of WORD in the sorted list instead of filtering
    #[arg(short, long, value_name = "WORD")]
    pub lookup: Option<String>,

    /// Print the sorted reserved-word list before any other output
    #[arg(long, default_value_t = false)]
    pub show_list: bool,

    /// Show statistics after filtering
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - errors only
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Handling of words that do not fit in a word buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OverflowPolicy {
    /// Warn about the word, drop it and keep going
    #[default]
    Skip,
    /// Keep the first 20 characters and drop the rest
    Truncate,
    /// Stop with an error naming the offending word
    Abort,
}

impl Args {
    /// The lookup word folded to lowercase, as tokens from the text are
    pub fn normalized_lookup(&self) -> anyhow::Result<Option<String>> {
        let Some(ref word) = self.lookup else {
            return Ok(None);
        };

        let word = word.trim();
        if word.is_empty() {
            anyhow::bail!("Lookup word must not be empty");
        }
        if word.len() > MAX_WORD_SIZE {
            anyhow::bail!(
                "Lookup word '{}' exceeds {} characters",
                word,
                MAX_WORD_SIZE
            );
        }
        if word.bytes().any(crate::word::is_space) {
            anyhow::bail!("Lookup word '{}' must be a single word", word);
        }

        Ok(Some(word.to_ascii_lowercase()))
    }

    /// Log level implied by the quiet/verbose flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}
