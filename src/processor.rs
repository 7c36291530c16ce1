//! Core processing engine
//!
//! Runs the three phases in order: load the reserved words, sort them, then
//! stream the text through the token filter. Both inputs are opened before
//! anything is read, so a missing file stops the run before any output.

use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{Args, OverflowPolicy};
use crate::error::FilterError;
use crate::filter::TokenFilter;
use crate::loader::{load_reserved_words, ReservedWordList};
use crate::output::OutputWriter;
use crate::progress::RunSummary;

/// What to do once the reserved list is sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Report every unreserved token of the text file
    Filter,
    /// Report the sorted position of a single word
    Lookup(String),
}

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub reserved_path: PathBuf,
    pub text_path: PathBuf,
    pub overflow: OverflowPolicy,
    pub mode: Mode,
    pub show_list: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let mode = match args.normalized_lookup()? {
            Some(word) => Mode::Lookup(word),
            None => Mode::Filter,
        };

        Ok(Self {
            reserved_path: args.reserved.clone(),
            text_path: args.text.clone(),
            overflow: args.overlong,
            mode,
            show_list: args.show_list,
        })
    }
}

/// Opened input for the final phase
enum Job<'a> {
    Filter(File),
    Lookup(&'a str),
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Run all phases, writing results to `out`
    pub fn run<W: Write>(&self, out: W) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::new();

        // Open everything up front so a missing input produces no output
        let job = match &self.config.mode {
            Mode::Filter => Job::Filter(open_input(&self.config.text_path)?),
            Mode::Lookup(word) => Job::Lookup(word),
        };
        let reserved = open_input(&self.config.reserved_path)?;

        summary.reserved_bytes = reserved.metadata().map(|m| m.len()).unwrap_or(0);
        let list = self.load_sorted(reserved, &mut summary)?;

        let mut output = OutputWriter::new(out);

        if self.config.show_list {
            output.write_sorted_list(&list)?;
        }

        match job {
            Job::Lookup(word) => {
                let position = list.position(word.as_bytes());
                log::debug!("Lookup of \"{}\" -> {:?}", word, position);
                output.write_lookup(word, position, list.len())?;
            }
            Job::Filter(text) => {
                let filter = TokenFilter::new(&list, self.config.overflow);
                let result = filter.run(text, |token| Ok(output.write_word(token)?));

                // Keep whatever was reported before a failure
                output.flush()?;
                summary.filter = result.with_context(|| {
                    format!("Failed to filter {:?}", self.config.text_path)
                })?;
            }
        }

        output.flush()?;
        summary.lines_written = output.lines_written();
        summary.bytes_written = output.bytes_written();
        Ok(summary)
    }

    /// Phase one and two: load the reserved words and sort them
    fn load_sorted(
        &self,
        reserved: File,
        summary: &mut RunSummary,
    ) -> anyhow::Result<ReservedWordList> {
        let mut list = load_reserved_words(reserved, self.config.overflow)
            .with_context(|| format!("Failed to load {:?}", self.config.reserved_path))?;

        if list.is_empty() {
            log::warn!(
                "No reserved words in {:?}; every token will be reported",
                self.config.reserved_path
            );
        }

        summary.sort = list.sort();
        summary.reserved_words = list.len();
        Ok(list)
    }
}

/// Open a required input for reading
fn open_input(path: &Path) -> Result<File, FilterError> {
    File::open(path).map_err(|source| FilterError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{exit_code_for, EXIT_INPUT_UNAVAILABLE};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(reserved: &str, text: &str) -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("reserved.txt"), reserved).unwrap();
            fs::write(dir.path().join("text.txt"), text).unwrap();
            Self { dir }
        }

        fn config(&self) -> ProcessorConfig {
            ProcessorConfig {
                reserved_path: self.dir.path().join("reserved.txt"),
                text_path: self.dir.path().join("text.txt"),
                overflow: OverflowPolicy::Skip,
                mode: Mode::Filter,
                show_list: false,
            }
        }

        fn run(&self, config: ProcessorConfig) -> anyhow::Result<(String, RunSummary)> {
            let mut out = Vec::new();
            let summary = Processor::new(config).run(&mut out)?;
            Ok((String::from_utf8(out).unwrap(), summary))
        }
    }

    #[test]
    fn test_filter_scenario() {
        let fx = Fixture::new("cherry\napple\nbanana\n", "I like Apple and Cherry-pie!");
        let (out, summary) = fx.run(fx.config()).unwrap();

        assert_eq!(out, "i\nlike\nand\npie\n");
        assert_eq!(summary.reserved_words, 3);
        assert_eq!(summary.filter.tokens, 6);
        assert_eq!(summary.filter.suppressed, 2);
        assert_eq!(summary.filter.emitted, 4);
        assert_eq!(summary.lines_written, 4);
        assert_eq!(summary.bytes_written, out.len() as u64);
    }

    #[test]
    fn test_empty_reserved_list() {
        let fx = Fixture::new("", "go Go GO");
        let (out, _) = fx.run(fx.config()).unwrap();

        assert_eq!(out, "go\ngo\ngo\n");
    }

    #[test]
    fn test_text_without_letters() {
        let fx = Fixture::new("apple", "  123 ... 4,5 !? \n\n");
        let (out, summary) = fx.run(fx.config()).unwrap();

        assert!(out.is_empty());
        assert_eq!(summary.filter.tokens, 0);
    }

    #[test]
    fn test_missing_text_file() {
        let fx = Fixture::new("apple", "apple");
        let mut config = fx.config();
        config.text_path = fx.dir.path().join("nope.txt");
        config.show_list = true;

        let mut out = Vec::new();
        let err = Processor::new(config).run(&mut out).unwrap_err();

        assert_eq!(exit_code_for(&err), EXIT_INPUT_UNAVAILABLE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_reserved_file() {
        let fx = Fixture::new("apple", "banana");
        let mut config = fx.config();
        config.reserved_path = fx.dir.path().join("nope.txt");

        let mut out = Vec::new();
        let err = Processor::new(config).run(&mut out).unwrap_err();

        assert_eq!(exit_code_for(&err), EXIT_INPUT_UNAVAILABLE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_show_list_precedes_tokens() {
        let fx = Fixture::new("pear fig", "Fig jam");
        let mut config = fx.config();
        config.show_list = true;

        let (out, summary) = fx.run(config).unwrap();
        assert_eq!(out, "The sorted list of 2 words..\n   fig\n   pear\njam\n");
        assert_eq!(summary.sort.swaps, 1);
    }

    #[test]
    fn test_lookup_mode() {
        let fx = Fixture::new("cherry apple banana", "");
        let mut config = fx.config();
        config.mode = Mode::Lookup("banana".to_string());
        // Lookup needs only the reserved list
        config.text_path = fx.dir.path().join("absent.txt");

        let (out, _) = fx.run(config.clone()).unwrap();
        assert_eq!(out, "\"banana\" is word #2 of 3.\n");

        config.mode = Mode::Lookup("durian".to_string());
        let (out, _) = fx.run(config).unwrap();
        assert_eq!(out, "\"durian\" was not found...\n");
    }

    #[test]
    fn test_overlong_token_skipped_by_default() {
        let fx = Fixture::new("tail", "short Supercalifragilisticexpialidocious more tail");
        let (out, summary) = fx.run(fx.config()).unwrap();

        assert_eq!(out, "short\nmore\n");
        assert_eq!(summary.filter.skipped, 1);
        assert_eq!(summary.filter.tokens, 3);
        assert_eq!(summary.filter.suppressed, 1);
    }

    #[test]
    fn test_overlong_token_abort_keeps_earlier_output() {
        let fx = Fixture::new("", "short Supercalifragilisticexpialidocious tail");
        let mut config = fx.config();
        config.overflow = OverflowPolicy::Abort;

        let mut out = Vec::new();
        let err = Processor::new(config).run(&mut out).unwrap_err();
        assert!(err.chain().any(|c| matches!(
            c.downcast_ref::<FilterError>(),
            Some(FilterError::TokenTooLong { .. })
        )));
        assert_eq!(String::from_utf8(out).unwrap(), "short\n");
    }

    #[test]
    fn test_overlong_token_truncated() {
        let fx = Fixture::new("", "short Supercalifragilisticexpialidocious tail");
        let mut config = fx.config();
        config.overflow = OverflowPolicy::Truncate;

        let (out, summary) = fx.run(config).unwrap();
        assert_eq!(out, "short\nsupercalifragilistic\ntail\n");
        assert_eq!(summary.filter.truncated, 1);
    }

    #[test]
    fn test_overlong_reserved_word_skipped() {
        let fx = Fixture::new("antidisestablishmentarianism text", "Text and more");
        let (out, summary) = fx.run(fx.config()).unwrap();

        assert_eq!(out, "and\nmore\n");
        assert_eq!(summary.reserved_words, 1);
    }

    #[test]
    fn test_overlong_reserved_word_aborts() {
        let fx = Fixture::new("antidisestablishmentarianism", "text");
        let mut config = fx.config();
        config.overflow = OverflowPolicy::Abort;
        let err = fx.run(config).unwrap_err();

        assert!(err.chain().any(|c| matches!(
            c.downcast_ref::<FilterError>(),
            Some(FilterError::ReservedWordTooLong { index: 1, .. })
        )));
    }

    #[test]
    fn test_config_from_args() {
        use clap::Parser;

        let args = Args::try_parse_from([
            "reserved-filter",
            "-r",
            "r.txt",
            "--lookup",
            "Kiwi",
            "--show-list",
        ])
        .unwrap();
        let config = ProcessorConfig::from_args(&args).unwrap();

        assert_eq!(config.reserved_path, PathBuf::from("r.txt"));
        assert_eq!(config.mode, Mode::Lookup("kiwi".to_string()));
        assert!(config.show_list);
        assert_eq!(config.overflow, OverflowPolicy::Skip);
    }
}
