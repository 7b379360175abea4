//! Reconstruct git-apply-compatible patch text from the model.

mod builder;

pub use builder::{build_file_patch, build_hunk_patch, build_review_patch};
