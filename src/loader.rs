//! Reserved-word list loading
//!
//! Reads whitespace-separated words from a byte stream into a bounded,
//! ordered list. The list is sorted once after loading and only read from
//! then on.

use std::io::{BufReader, Read};

use crate::cli::OverflowPolicy;
use crate::error::FilterError;
use crate::search::three_point_search;
use crate::sorter::{bubble_sort, SortReport};
use crate::word::{is_space, BoundedWord, MAX_WORD_SIZE};

/// Maximum number of reserved words kept from the input
pub const MAX_LIST_SIZE: usize = 50;

/// Bounded list of reserved words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedWordList {
    words: Vec<BoundedWord>,
}

impl ReservedWordList {
    pub fn new() -> Self {
        Self {
            words: Vec::with_capacity(MAX_LIST_SIZE),
        }
    }

    /// Append a word; returns false once the list is at capacity
    pub fn push(&mut self, word: BoundedWord) -> bool {
        if self.is_full() {
            return false;
        }
        self.words.push(word);
        true
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= MAX_LIST_SIZE
    }

    pub fn words(&self) -> &[BoundedWord] {
        &self.words
    }

    /// Sort ascending by byte-wise comparison
    pub fn sort(&mut self) -> SortReport {
        bubble_sort(&mut self.words)
    }

    /// Index of `word` in the sorted list, if present
    pub fn position(&self, word: &[u8]) -> Option<usize> {
        three_point_search(&self.words, word)
    }
}

/// Build a list directly from in-memory words (used mostly by tests)
impl<'a> TryFrom<&[&'a str]> for ReservedWordList {
    type Error = FilterError;

    fn try_from(words: &[&'a str]) -> Result<Self, Self::Error> {
        let mut list = Self::new();
        for (index, word) in words.iter().enumerate() {
            let bounded = BoundedWord::from_bytes(word.as_bytes()).map_err(|_| {
                FilterError::ReservedWordTooLong {
                    index: index + 1,
                    prefix: word.chars().take(MAX_WORD_SIZE).collect(),
                    limit: MAX_WORD_SIZE,
                }
            })?;
            if !list.push(bounded) {
                break;
            }
        }
        Ok(list)
    }
}

/// Load up to [`MAX_LIST_SIZE`] words from `reader`.
///
/// Words are maximal runs of non-whitespace bytes, stored verbatim. Loading
/// stops at end of stream or once the list is full; nothing after the last
/// stored word is examined. A word longer than [`MAX_WORD_SIZE`] is handled
/// according to `policy`.
pub fn load_reserved_words<R: Read>(
    reader: R,
    policy: OverflowPolicy,
) -> Result<ReservedWordList, FilterError> {
    let mut list = ReservedWordList::new();
    let mut current = BoundedWord::new();
    let mut in_word = false;
    let mut overflowed = false;

    for byte in BufReader::new(reader).bytes() {
        let byte = byte.map_err(FilterError::Read)?;

        if is_space(byte) {
            if in_word {
                finish_word(&mut list, &current, overflowed, policy);
                current.clear();
                in_word = false;
                overflowed = false;
            }
            continue;
        }

        if !in_word {
            if list.is_full() {
                log::warn!(
                    "Reserved-word list is full at {} words; the rest of the file is ignored",
                    MAX_LIST_SIZE
                );
                return Ok(list);
            }
            in_word = true;
        }

        if current.try_push(byte).is_err() && !overflowed {
            overflowed = true;
            let err = FilterError::ReservedWordTooLong {
                index: list.len() + 1,
                prefix: current.to_string_lossy(),
                limit: MAX_WORD_SIZE,
            };
            match policy {
                OverflowPolicy::Abort => return Err(err),
                OverflowPolicy::Skip => log::warn!("{}; skipped", err),
                OverflowPolicy::Truncate => log::debug!("{}; truncated", err),
            }
        }
    }

    if in_word {
        finish_word(&mut list, &current, overflowed, policy);
    }

    log::debug!("Loaded {} reserved words", list.len());
    Ok(list)
}

/// Store a completed word unless it overflowed and is being skipped
fn finish_word(
    list: &mut ReservedWordList,
    word: &BoundedWord,
    overflowed: bool,
    policy: OverflowPolicy,
) {
    if overflowed && policy == OverflowPolicy::Skip {
        return;
    }
    // Capacity is checked before a word starts, so this cannot fail
    list.push(*word);
}
