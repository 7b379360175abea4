//! Serialize hunks back into unified-diff text.
//!
//! The builder is the inverse of the parser and is deliberately lenient: it
//! serializes whatever hunk it is given, without checking that line counts
//! match the header coordinates. Callers holding hand-edited hunks are
//! responsible for their consistency (or can opt into
//! [`crate::validate::validate_hunk`] first).

use crate::model::{Hunk, HunkAction, ReviewState};

/// Build a complete single-hunk patch for `file_path`.
///
/// The output is a two-line file header followed by the hunk, ready for
/// `git apply`. `old_path` overrides the `---` side for renamed files.
pub fn build_hunk_patch(file_path: &str, hunk: &Hunk, old_path: Option<&str>) -> String {
    let mut patch = String::new();
    push_file_header(&mut patch, file_path, old_path);
    push_hunk(&mut patch, hunk);
    patch
}

/// Build a whole-file patch containing every hunk in `hunks`, in order.
pub fn build_file_patch(file_path: &str, hunks: &[Hunk], old_path: Option<&str>) -> String {
    let mut patch = String::new();
    push_file_header(&mut patch, file_path, old_path);
    for hunk in hunks {
        push_hunk(&mut patch, hunk);
    }
    patch
}

/// Build a patch containing only the hunks the reviewer accepted.
///
/// The review state is passed in explicitly; the engine holds none of its
/// own. Returns `None` when no hunk is marked [`HunkAction::Accept`], so the
/// caller never hands an empty patch to `git apply`.
pub fn build_review_patch(
    file_path: &str,
    hunks: &[Hunk],
    review: &ReviewState,
    old_path: Option<&str>,
) -> Option<String> {
    let accepted: Vec<&Hunk> = hunks
        .iter()
        .enumerate()
        .filter(|(i, _)| review.action_for(*i) == HunkAction::Accept)
        .map(|(_, h)| h)
        .collect();

    if accepted.is_empty() {
        return None;
    }

    let mut patch = String::new();
    push_file_header(&mut patch, file_path, old_path);
    for hunk in accepted {
        push_hunk(&mut patch, hunk);
    }
    Some(patch)
}

fn push_file_header(patch: &mut String, file_path: &str, old_path: Option<&str>) {
    patch.push_str("--- a/");
    patch.push_str(old_path.unwrap_or(file_path));
    patch.push('\n');
    patch.push_str("+++ b/");
    patch.push_str(file_path);
    patch.push('\n');
}

fn push_hunk(patch: &mut String, hunk: &Hunk) {
    patch.push_str(&hunk.header());
    patch.push('\n');
    for line in &hunk.lines {
        patch.push(line.kind.prefix());
        patch.push_str(&line.content);
        patch.push('\n');
    }
}
