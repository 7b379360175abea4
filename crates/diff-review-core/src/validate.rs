//! Opt-in strict validation of model invariants.
//!
//! The parser maintains these invariants by construction and the patch
//! builder deliberately never checks them. Callers that accept hand-edited
//! hunks (or deserialize them from elsewhere) can validate here before
//! building a patch.

use crate::model::{DiffLine, FileDiff, Hunk, LineKind};
use thiserror::Error;

/// Violations of the cross-field invariants a well-formed hunk upholds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("header claims {expected} pre-image lines but the body has {actual}")]
    OldCountMismatch { expected: u32, actual: u32 },

    #[error("header claims {expected} post-image lines but the body has {actual}")]
    NewCountMismatch { expected: u32, actual: u32 },

    #[error("line {index}: expected pre-image number {expected}, found {found:?}")]
    OldLineOutOfOrder {
        index: usize,
        expected: u32,
        found: Option<u32>,
    },

    #[error("line {index}: expected post-image number {expected}, found {found:?}")]
    NewLineOutOfOrder {
        index: usize,
        expected: u32,
        found: Option<u32>,
    },

    #[error("line {index}: {kind:?} line carries a line number for the wrong side")]
    MisplacedLineNumber { index: usize, kind: LineKind },

    #[error("hunk {index} overlaps or precedes the hunk before it")]
    HunkOutOfOrder { index: usize },
}

/// Check a single hunk against the model invariants: side counts match the
/// header, per-side numbering is contiguous from `old_start`/`new_start`, and
/// each line kind only carries the numbers its side allows. Note lines are
/// annotations and exempt from all of it.
pub fn validate_hunk(hunk: &Hunk) -> Result<(), InvariantError> {
    let mut next_old = hunk.old_start;
    let mut next_new = hunk.new_start;

    for (index, line) in hunk.lines.iter().enumerate() {
        match line.kind {
            LineKind::Context => {
                expect_old(line, index, next_old)?;
                expect_new(line, index, next_new)?;
                next_old += 1;
                next_new += 1;
            }
            LineKind::Deletion => {
                expect_old(line, index, next_old)?;
                if line.new_line.is_some() {
                    return Err(InvariantError::MisplacedLineNumber {
                        index,
                        kind: line.kind,
                    });
                }
                next_old += 1;
            }
            LineKind::Addition => {
                expect_new(line, index, next_new)?;
                if line.old_line.is_some() {
                    return Err(InvariantError::MisplacedLineNumber {
                        index,
                        kind: line.kind,
                    });
                }
                next_new += 1;
            }
            LineKind::Note => {
                if line.old_line.is_some() || line.new_line.is_some() {
                    return Err(InvariantError::MisplacedLineNumber {
                        index,
                        kind: line.kind,
                    });
                }
            }
        }
    }

    let actual_old = next_old - hunk.old_start;
    if actual_old != hunk.old_count {
        return Err(InvariantError::OldCountMismatch {
            expected: hunk.old_count,
            actual: actual_old,
        });
    }
    let actual_new = next_new - hunk.new_start;
    if actual_new != hunk.new_count {
        return Err(InvariantError::NewCountMismatch {
            expected: hunk.new_count,
            actual: actual_new,
        });
    }
    Ok(())
}

/// Validate every hunk of a file and check that hunks are non-overlapping
/// and strictly increasing by `old_start`.
pub fn validate_file(file: &FileDiff) -> Result<(), InvariantError> {
    for hunk in &file.hunks {
        validate_hunk(hunk)?;
    }
    for (index, pair) in file.hunks.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if next.old_start <= current.old_start
            || next.old_start < current.old_start + current.old_count
        {
            return Err(InvariantError::HunkOutOfOrder { index: index + 1 });
        }
    }
    Ok(())
}

fn expect_old(line: &DiffLine, index: usize, expected: u32) -> Result<(), InvariantError> {
    if line.old_line != Some(expected) {
        return Err(InvariantError::OldLineOutOfOrder {
            index,
            expected,
            found: line.old_line,
        });
    }
    Ok(())
}

fn expect_new(line: &DiffLine, index: usize, expected: u32) -> Result<(), InvariantError> {
    if line.new_line != Some(expected) {
        return Err(InvariantError::NewLineOutOfOrder {
            index,
            expected,
            found: line.new_line,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_file_diffs, parse_hunks};
    use pretty_assertions::assert_eq;

    const DIFF: &str = "\
diff --git a/f.txt b/f.txt
--- a/f.txt
+++ b/f.txt
@@ -10,3 +10,4 @@
 context
-removed
+added one
+added two
 trailing
@@ -40,1 +41,1 @@
-x
+y
\\ No newline at end of file
";

    #[test]
    fn test_parser_output_always_validates() {
        let hunks = parse_hunks(DIFF);
        assert_eq!(hunks.len(), 2);
        for hunk in &hunks {
            assert_eq!(validate_hunk(hunk), Ok(()));
        }

        let files = parse_file_diffs(DIFF);
        assert_eq!(validate_file(&files[0]), Ok(()));
    }

    #[test]
    fn test_count_mismatch_is_caught() {
        let mut hunk = parse_hunks(DIFF).remove(0);
        hunk.old_count += 1;
        assert_eq!(
            validate_hunk(&hunk),
            Err(InvariantError::OldCountMismatch {
                expected: 4,
                actual: 3
            })
        );

        let mut hunk = parse_hunks(DIFF).remove(0);
        hunk.new_count = 1;
        assert_eq!(
            validate_hunk(&hunk),
            Err(InvariantError::NewCountMismatch {
                expected: 1,
                actual: 4
            })
        );
    }

    #[test]
    fn test_broken_numbering_is_caught() {
        let mut hunk = parse_hunks(DIFF).remove(0);
        hunk.lines[2].new_line = Some(999);
        assert!(matches!(
            validate_hunk(&hunk),
            Err(InvariantError::NewLineOutOfOrder { index: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_side_number_is_caught() {
        let mut hunk = parse_hunks(DIFF).remove(0);
        // An addition must never carry a pre-image number.
        hunk.lines[2].old_line = Some(11);
        assert_eq!(
            validate_hunk(&hunk),
            Err(InvariantError::MisplacedLineNumber {
                index: 2,
                kind: LineKind::Addition
            })
        );
    }

    #[test]
    fn test_overlapping_hunks_are_caught() {
        let mut file = parse_file_diffs(DIFF).remove(0);
        file.hunks[1].old_start = 11;
        // Re-number the second hunk so the hunk itself stays valid.
        file.hunks[1].lines[0].old_line = Some(11);
        file.hunks[1].new_start = 12;
        file.hunks[1].lines[1].new_line = Some(12);
        assert_eq!(
            validate_file(&file),
            Err(InvariantError::HunkOutOfOrder { index: 1 })
        );
    }
}
