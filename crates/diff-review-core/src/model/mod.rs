//! Data models for diff representation and review state.

mod comment;
mod diff;
mod review;

pub use comment::{CommentList, DiffComment};
pub use diff::{DiffLine, FileDiff, FileKind, Hunk, LineKind};
pub use review::{HunkAction, ReviewState};
