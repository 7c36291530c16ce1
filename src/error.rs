//! Error types for reserved-word filtering
//!
//! `InputUnavailable` is the only condition the program cannot recover from
//! before doing any work. The length conditions are warnings under the default
//! overflow policy and become fatal only with `abort`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status used when a required input file cannot be opened.
pub const EXIT_INPUT_UNAVAILABLE: i32 = 10;

/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("'{}' failed to open", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reserved word #{index} starting with \"{prefix}\" exceeds {limit} characters")]
    ReservedWordTooLong {
        index: usize,
        prefix: String,
        limit: usize,
    },

    #[error("token starting with \"{prefix}\" exceeds {limit} characters")]
    TokenTooLong { prefix: String, limit: usize },

    #[error("read error: {0}")]
    Read(#[source] io::Error),

    #[error("write error: {0}")]
    Write(#[source] io::Error),
}

impl FilterError {
    /// Process exit status associated with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputUnavailable { .. } => EXIT_INPUT_UNAVAILABLE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Map an error chain to the exit status the binary should return.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<FilterError>())
        .map(FilterError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
