//! Token extraction and reserved-word filtering
//!
//! The main text is read one byte at a time. Letters are folded to lowercase
//! and collected into a candidate token; whitespace (and `-`) closes the
//! token; anything else is dropped without closing it. Each closed token is
//! looked up in the sorted reserved-word list and passed on only if absent.

use std::io::{BufReader, Bytes, Read};

use crate::cli::OverflowPolicy;
use crate::error::FilterError;
use crate::loader::ReservedWordList;
use crate::word::{is_space, BoundedWord, MAX_WORD_SIZE};

/// How a single input byte is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// ASCII letter, kept and folded to lowercase
    Letter,
    /// Ends the current token
    Delimiter,
    /// Dropped without ending the token (digits, punctuation, anything else)
    Discard,
}

/// Classify one byte of the main text
#[inline]
pub fn classify(byte: u8) -> ByteClass {
    if byte.is_ascii_alphabetic() {
        ByteClass::Letter
    } else if is_space(byte) || byte == b'-' {
        ByteClass::Delimiter
    } else {
        ByteClass::Discard
    }
}

/// Position of the tokenizer between bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Between tokens
    Idle,
    /// Inside a token
    Accumulating,
}

/// Counters collected while filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub bytes_read: u64,
    pub discarded_bytes: u64,
    pub tokens: u64,
    pub suppressed: u64,
    pub emitted: u64,
    pub truncated: u64,
    pub skipped: u64,
}

/// Iterator over the tokens of a byte stream
pub struct Tokens<R: Read> {
    bytes: Bytes<BufReader<R>>,
    token: BoundedWord,
    state: TokenState,
    policy: OverflowPolicy,
    overflowed: bool,
    finished: bool,
    stats: FilterStats,
}

impl<R: Read> Tokens<R> {
    pub fn new(reader: R, policy: OverflowPolicy) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            token: BoundedWord::new(),
            state: TokenState::Idle,
            policy,
            overflowed: false,
            finished: false,
            stats: FilterStats::default(),
        }
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    /// Close the pending token and return to `Idle`.
    ///
    /// Yields `None` when the token overflowed and is being skipped.
    fn take_token(&mut self) -> Option<BoundedWord> {
        let token = self.token;
        let skip = self.overflowed && self.policy == OverflowPolicy::Skip;
        self.token.clear();
        self.state = TokenState::Idle;
        self.overflowed = false;

        if skip {
            self.stats.skipped += 1;
            return None;
        }
        self.stats.tokens += 1;
        Some(token)
    }

    fn append(&mut self, letter: u8) -> Result<(), FilterError> {
        self.state = TokenState::Accumulating;
        if self.token.try_push(letter.to_ascii_lowercase()).is_ok() || self.overflowed {
            return Ok(());
        }

        self.overflowed = true;
        let err = FilterError::TokenTooLong {
            prefix: self.token.to_string_lossy(),
            limit: MAX_WORD_SIZE,
        };
        match self.policy {
            OverflowPolicy::Abort => return Err(err),
            OverflowPolicy::Skip => log::warn!("{}; skipped", err),
            OverflowPolicy::Truncate => {
                log::debug!("{}; truncated", err);
                self.stats.truncated += 1;
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Tokens<R> {
    type Item = Result<BoundedWord, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(byte) = self.bytes.next() {
            let byte = match byte {
                Ok(b) => b,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(FilterError::Read(e)));
                }
            };
            self.stats.bytes_read += 1;

            match classify(byte) {
                ByteClass::Letter => {
                    if let Err(e) = self.append(byte) {
                        self.finished = true;
                        return Some(Err(e));
                    }
                }
                ByteClass::Discard => {
                    self.stats.discarded_bytes += 1;
                    continue;
                }
                ByteClass::Delimiter => {
                    if self.state == TokenState::Accumulating {
                        if let Some(token) = self.take_token() {
                            return Some(Ok(token));
                        }
                    }
                }
            }
        }

        // End of stream flushes a pending token
        self.finished = true;
        if self.state == TokenState::Accumulating {
            self.take_token().map(Ok)
        } else {
            None
        }
    }
}

/// Streams text against a sorted reserved-word list
pub struct TokenFilter<'a> {
    list: &'a ReservedWordList,
    policy: OverflowPolicy,
}

impl<'a> TokenFilter<'a> {
    pub fn new(list: &'a ReservedWordList, policy: OverflowPolicy) -> Self {
        Self { list, policy }
    }

    /// True if the token should be reported
    #[inline]
    pub fn is_unreserved(&self, token: &BoundedWord) -> bool {
        self.list.position(token.as_bytes()).is_none()
    }

    /// Filter `reader`, handing every unreserved token to `emit` in source
    /// order.
    pub fn run<R, F>(&self, reader: R, mut emit: F) -> anyhow::Result<FilterStats>
    where
        R: Read,
        F: FnMut(&BoundedWord) -> anyhow::Result<()>,
    {
        let mut tokens = Tokens::new(reader, self.policy);
        let mut suppressed = 0;
        let mut emitted = 0;

        for token in tokens.by_ref() {
            let token = token?;

            if self.is_unreserved(&token) {
                emit(&token)?;
                emitted += 1;
            } else {
                log::trace!("Suppressed reserved token \"{}\"", token);
                suppressed += 1;
            }
        }

        let mut stats = *tokens.stats();
        stats.suppressed = suppressed;
        stats.emitted = emitted;

        log::debug!(
            "Filtered {} tokens: {} reported, {} reserved",
            stats.tokens,
            stats.emitted,
            stats.suppressed
        );

        Ok(stats)
    }

    /// Collect the unreserved tokens of `reader` into strings
    pub fn unreserved_tokens<R: Read>(&self, reader: R) -> anyhow::Result<Vec<String>> {
        let mut out = Vec::new();
        self.run(reader, |token| {
            out.push(token.to_string());
            Ok(())
        })?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        Tokens::new(text.as_bytes(), OverflowPolicy::Skip)
            .map(|t| t.unwrap().to_string())
            .collect()
    }

    fn sorted_list(words: &[&str]) -> ReservedWordList {
        let mut list = ReservedWordList::try_from(words).unwrap();
        list.sort();
        list
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b'a'), ByteClass::Letter);
        assert_eq!(classify(b'Z'), ByteClass::Letter);
        assert_eq!(classify(b' '), ByteClass::Delimiter);
        assert_eq!(classify(b'\n'), ByteClass::Delimiter);
        assert_eq!(classify(b'-'), ByteClass::Delimiter);
        assert_eq!(classify(b'7'), ByteClass::Discard);
        assert_eq!(classify(b'!'), ByteClass::Discard);
        assert_eq!(classify(b'\''), ByteClass::Discard);
        assert_eq!(classify(0xe9), ByteClass::Discard);
    }

    #[test]
    fn test_tokens_fold_and_split() {
        assert_eq!(
            tokens("I like Apple and Cherry-pie!"),
            vec!["i", "like", "apple", "and", "cherry", "pie"]
        );
    }

    #[test]
    fn test_punctuation_and_digits_do_not_split() {
        assert_eq!(tokens("don't R2D2 e.g."), vec!["dont", "rd", "eg"]);
    }

    #[test]
    fn test_consecutive_delimiters() {
        assert_eq!(tokens("  one \t\n\n two  -- three   "), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_pending_token_at_end_of_stream() {
        assert_eq!(tokens("last"), vec!["last"]);
        assert_eq!(tokens("last!!"), vec!["last"]);
    }

    #[test]
    fn test_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" 123 ... 4,5 ?! \n").is_empty());
    }

    #[test]
    fn test_token_state_and_stats() {
        let mut iter = Tokens::new(&b"ab, cd"[..], OverflowPolicy::Skip);
        assert_eq!(iter.state(), TokenState::Idle);

        assert_eq!(iter.next().unwrap().unwrap().to_string(), "ab");
        assert_eq!(iter.state(), TokenState::Idle);
        assert_eq!(iter.next().unwrap().unwrap().to_string(), "cd");
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());

        let stats = iter.stats();
        assert_eq!(stats.bytes_read, 6);
        assert_eq!(stats.discarded_bytes, 1);
        assert_eq!(stats.tokens, 2);
    }

    #[test]
    fn test_overlong_token_skipped() {
        let mut iter = Tokens::new(
            &b"ok Pneumonoultramicroscopic next Supercalifragilisticexpialidocious"[..],
            OverflowPolicy::Skip,
        );
        let all: Vec<String> = iter.by_ref().map(|t| t.unwrap().to_string()).collect();

        assert_eq!(all, vec!["ok", "next"]);
        assert_eq!(iter.stats().tokens, 2);
        assert_eq!(iter.stats().skipped, 2);
        assert_eq!(iter.state(), TokenState::Idle);
    }

    #[test]
    fn test_overlong_token_aborts() {
        let mut iter = Tokens::new(
            &b"ok Pneumonoultramicroscopic next"[..],
            OverflowPolicy::Abort,
        );

        assert_eq!(iter.next().unwrap().unwrap().to_string(), "ok");
        match iter.next() {
            Some(Err(FilterError::TokenTooLong { prefix, limit })) => {
                assert_eq!(prefix, "pneumonoultramicrosc");
                assert_eq!(limit, MAX_WORD_SIZE);
            }
            other => panic!("unexpected item: {:?}", other.map(|r| r.map(|t| t.to_string()))),
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_overlong_token_truncated() {
        let mut iter = Tokens::new(
            &b"Pneumonoultramicroscopic next"[..],
            OverflowPolicy::Truncate,
        );
        let all: Vec<String> = iter.by_ref().map(|t| t.unwrap().to_string()).collect();

        assert_eq!(all, vec!["pneumonoultramicrosc", "next"]);
        assert_eq!(iter.stats().truncated, 1);
    }

    #[test]
    fn test_filter_scenario() {
        let list = sorted_list(&["apple", "banana", "cherry"]);
        let filter = TokenFilter::new(&list, OverflowPolicy::Skip);

        let out = filter
            .unreserved_tokens("I like Apple and Cherry-pie!".as_bytes())
            .unwrap();
        assert_eq!(out, vec!["i", "like", "and", "pie"]);
    }

    #[test]
    fn test_empty_list_reports_everything() {
        let list = ReservedWordList::new();
        let filter = TokenFilter::new(&list, OverflowPolicy::Skip);

        let out = filter.unreserved_tokens("go Go GO".as_bytes()).unwrap();
        assert_eq!(out, vec!["go", "go", "go"]);
    }

    #[test]
    fn test_run_stats() {
        let list = sorted_list(&["the", "a"]);
        let filter = TokenFilter::new(&list, OverflowPolicy::Skip);

        let mut seen = Vec::new();
        let stats = filter
            .run("The cat sat on a mat, the end.".as_bytes(), |t| {
                seen.push(t.to_string());
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["cat", "sat", "on", "mat", "end"]);
        assert_eq!(stats.tokens, 8);
        assert_eq!(stats.suppressed, 3);
        assert_eq!(stats.emitted, 5);
    }

    #[test]
    fn test_mixed_case_reserved_entries_never_match() {
        let list = sorted_list(&["Apple"]);
        let filter = TokenFilter::new(&list, OverflowPolicy::Skip);

        let out = filter.unreserved_tokens("apple APPLE".as_bytes()).unwrap();
        assert_eq!(out, vec!["apple", "apple"]);
    }

    #[test]
    fn test_emit_error_stops_run() {
        let list = ReservedWordList::new();
        let filter = TokenFilter::new(&list, OverflowPolicy::Skip);

        let mut calls = 0;
        let result = filter.run("one two three".as_bytes(), |_| {
            calls += 1;
            anyhow::bail!("sink closed")
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
