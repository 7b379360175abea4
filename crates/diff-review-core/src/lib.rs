//! # diff-review-core
//!
//! The unified-diff domain model and hunk-review engine behind a
//! human-in-the-loop code-review workflow: parse unified-diff text into an
//! addressable model, align changed line pairs token-by-token, track per-hunk
//! accept/reject decisions, and serialize the model back into patches that
//! `git apply` accepts.
//!
//! ## Design Principles
//!
//! This crate is pure computation over strings and in-memory values. It
//! performs no I/O, spawns no processes, and holds no global state. The
//! embedding application owns the review lifecycle (which hunks are accepted,
//! which comments exist) and passes that state back in explicitly; the engine
//! only defines the types and the operations over them. This enables:
//!
//! - Testability without a git repository or a terminal
//! - Reusability across frontends (TUI, desktop shell, CI bot)
//! - Safe concurrent use: every function is side-effect-free
//!
//! ## Leniency
//!
//! The parser is best-effort by contract: malformed headers are skipped, not
//! rejected, and text with no recognizable hunks yields an empty model (the
//! caller falls back to [`FileDiff::raw`]). Callers that want strict
//! guarantees opt in via [`validate::validate_hunk`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diff_review_core::{parse_file_diffs, HunkAction, ReviewState};
//! use diff_review_core::patch::build_review_patch;
//!
//! let files = parse_file_diffs(diff_text);
//!
//! let mut review = ReviewState::new();
//! review.set_action(0, HunkAction::Accept);
//!
//! if let Some(patch) = build_review_patch(&files[0].path, &files[0].hunks, &review, None) {
//!     // hand the patch text to the process layer for `git apply`
//! }
//! ```

pub mod align;
pub mod gap;
pub mod model;
pub mod parser;
pub mod patch;
pub mod validate;

// Re-export commonly used types
pub use align::{align_pair, AlignedPair, InlineSegment, SegmentKind};
pub use gap::gap_between;
pub use model::{
    CommentList, DiffComment, DiffLine, FileDiff, FileKind, Hunk, HunkAction, LineKind,
    ReviewState,
};
pub use parser::{parse_file_diffs, parse_hunks};
pub use patch::{build_file_patch, build_hunk_patch, build_review_patch};
pub use validate::{validate_file, validate_hunk, InvariantError};
