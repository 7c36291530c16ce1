//! Output management module
//!
//! Buffered line output for unreserved tokens and the optional list and
//! lookup reports. The binary writes to stdout; tests write to a `Vec<u8>`.

use std::io::{BufWriter, Write};

use crate::error::FilterError;
use crate::loader::ReservedWordList;
use crate::word::BoundedWord;

/// Default buffer size for output (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Line writer with buffering
pub struct OutputWriter<W: Write> {
    writer: BufWriter<W>,
    lines_written: u64,
    bytes_written: u64,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> Result<(), FilterError> {
        self.write_bytes(line.as_bytes())
    }

    /// Write a word's raw bytes as one line
    pub fn write_word(&mut self, word: &BoundedWord) -> Result<(), FilterError> {
        self.write_bytes(word.as_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FilterError> {
        self.writer.write_all(bytes).map_err(FilterError::Write)?;
        self.writer.write_all(b"\n").map_err(FilterError::Write)?;
        self.lines_written += 1;
        self.bytes_written += bytes.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Print the sorted list under a count header
    pub fn write_sorted_list(&mut self, list: &ReservedWordList) -> Result<(), FilterError> {
        self.write_line(&format!("The sorted list of {} words..", list.len()))?;
        for word in list.words() {
            self.write_line(&format!("   {}", word))?;
        }
        Ok(())
    }

    /// Report where `word` sits in the sorted list
    pub fn write_lookup(
        &mut self,
        word: &str,
        position: Option<usize>,
        total: usize,
    ) -> Result<(), FilterError> {
        match position {
            Some(index) => self.write_line(&format!(
                "\"{}\" is word #{} of {}.",
                word,
                index + 1,
                total
            )),
            None => self.write_line(&format!("\"{}\" was not found...", word)),
        }
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> Result<(), FilterError> {
        self.writer.flush().map_err(FilterError::Write)
    }

    /// Get number of lines written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, FilterError> {
        self.writer
            .into_inner()
            .map_err(|e| FilterError::Write(e.into_error()))
    }
}
