//! Unified-diff parsing.

mod unified;

pub use unified::{parse_file_diffs, parse_hunks};
