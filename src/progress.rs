//! Status display module
//!
//! Styled status lines and the statistics summary. Everything here goes to
//! stderr; stdout carries only the filter output.

use bytesize::ByteSize;
use colored::*;
use std::time::{Duration, Instant};

use crate::filter::FilterStats;
use crate::sorter::SortReport;

/// Print a section header
pub fn print_header(text: &str) {
    eprintln!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".cyan(), text);
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Everything worth reporting about one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reserved_words: usize,
    pub reserved_bytes: u64,
    pub sort: SortReport,
    pub filter: FilterStats,
    pub lines_written: u64,
    pub bytes_written: u64,
    pub start_time: Instant,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            reserved_words: 0,
            reserved_bytes: 0,
            sort: SortReport::default(),
            filter: FilterStats::default(),
            lines_written: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn tokens_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.filter.tokens as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let stats = &self.filter;

        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                    FILTERING COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!(
            "  {} {} ({})",
            "Reserved words: ".green(),
            self.reserved_words,
            ByteSize(self.reserved_bytes)
        );
        eprintln!(
            "  {} {} passes, {} swaps",
            "Sort:           ".green(),
            self.sort.passes,
            self.sort.swaps
        );
        eprintln!(
            "  {} {}",
            "Text read:      ".green(),
            ByteSize(stats.bytes_read)
        );
        eprintln!();

        eprintln!("  {} {}", "Tokens:         ".green(), format_number(stats.tokens));
        eprintln!(
            "  {} {}",
            "Reserved:       ".yellow(),
            format_number(stats.suppressed)
        );
        eprintln!(
            "  {} {}",
            "Reported:       ".green().bold(),
            format_number(stats.emitted).green().bold()
        );
        eprintln!(
            "  {} {}",
            "Bytes dropped:  ".green(),
            format_number(stats.discarded_bytes)
        );

        if stats.truncated > 0 {
            eprintln!(
                "  {} {}",
                "Truncated:      ".red(),
                format_number(stats.truncated).red()
            );
        }
        if stats.skipped > 0 {
            eprintln!(
                "  {} {}",
                "Skipped:        ".red(),
                format_number(stats.skipped).red()
            );
        }
        eprintln!(
            "  {} {} lines ({})",
            "Output:         ".green(),
            format_number(self.lines_written),
            ByteSize(self.bytes_written)
        );

        eprintln!();
        eprintln!("  {} {:.2?}", "Duration:       ".green(), self.elapsed());
        eprintln!(
            "  {} {:.2} tokens/sec",
            "Throughput:     ".green(),
            self.tokens_per_second()
        );
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Group the digits of a count in threes: 1234567 -> "1,234,567"
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;

    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    if lead > 0 {
        groups.push(&digits[..lead]);
    }
    groups.extend(
        digits.as_bytes()[lead..]
            .chunks(3)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.join(",")
}
