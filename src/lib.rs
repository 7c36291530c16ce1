//! # Reserved Filter
//!
//! Reports the words of a text that are not on a reserved-word list.
//!
//! ## Pipeline
//!
//! 1. **Load**: up to 50 whitespace-separated reserved words, 20 characters
//!    each, are read from the reserved-word file
//! 2. **Sort**: the list is bubble-sorted into byte-wise ascending order
//! 3. **Filter**: the text is streamed byte by byte; letters are folded to
//!    lowercase, digits and punctuation are dropped, whitespace and `-` end a
//!    word. Each word is looked up with a three-point binary search and
//!    printed if it is not reserved
//!
//! ## Usage
//!
//! ```bash
//! # Conventional file names in the current directory
//! reserved-filter
//!
//! # Explicit inputs
//! reserved-filter -r keywords.txt -t essay.txt
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reserved_filter::cli::OverflowPolicy;
//! use reserved_filter::filter::TokenFilter;
//! use reserved_filter::loader::load_reserved_words;
//!
//! let mut list = load_reserved_words("cherry apple banana".as_bytes(), OverflowPolicy::Skip)?;
//! list.sort();
//!
//! let filter = TokenFilter::new(&list, OverflowPolicy::Skip);
//! let words = filter.unreserved_tokens("I like Apple and Cherry-pie!".as_bytes())?;
//! assert_eq!(words, ["i", "like", "and", "pie"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod processor;
pub mod progress;
pub mod search;
pub mod sorter;
pub mod word;

pub use cli::Args;
pub use error::FilterError;
pub use processor::{Processor, ProcessorConfig};
