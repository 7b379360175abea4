//! Locality between consecutive hunks.

use crate::model::Hunk;

/// Number of unchanged pre-image lines between `hunks[index]` and the hunk
/// after it.
///
/// Derived purely from the header coordinates; no line content is scanned.
/// Returns 0 for the last hunk, for an out-of-range index, and for adjacent
/// or (malformed) overlapping hunks. Display layers use this to decide
/// whether to show a collapsed-context separator between two hunks.
pub fn gap_between(hunks: &[Hunk], index: usize) -> u32 {
    let Some(current) = hunks.get(index) else {
        return 0;
    };
    let Some(next) = index.checked_add(1).and_then(|i| hunks.get(i)) else {
        return 0;
    };
    next.old_start
        .saturating_sub(current.old_start.saturating_add(current.old_count))
}
