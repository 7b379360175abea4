//! Diff data structures representing one file's changes.

use serde::{Deserialize, Serialize};

/// Line type in a hunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Unchanged line (present on both sides).
    Context,
    /// Added line (`+`).
    Addition,
    /// Removed line (`-`).
    Deletion,
    /// A `\`-prefixed annotation such as `\ No newline at end of file`.
    /// Belongs to neither side and carries no line numbers.
    Note,
}

impl LineKind {
    /// The marker character this line carries in unified-diff text.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
            LineKind::Note => '\\',
        }
    }
}

/// A single line in a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content, without the leading `+`/`-`/` ` marker.
    pub content: String,
    /// Line number in the pre-image (for `Context` and `Deletion`).
    pub old_line: Option<u32>,
    /// Line number in the post-image (for `Context` and `Addition`).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a context line, numbered on both sides.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create an addition line, numbered on the post-image side only.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a deletion line, numbered on the pre-image side only.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a note line (e.g. a missing-trailing-newline marker).
    pub fn note(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Note,
            content: content.into(),
            old_line: None,
            new_line: None,
        }
    }

    /// The line number to show in a single-column gutter
    /// (prefers the post-image number).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }
}

/// A contiguous change region of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// 1-based starting line in the pre-image.
    pub old_start: u32,
    /// Number of pre-image lines the hunk covers.
    pub old_count: u32,
    /// 1-based starting line in the post-image.
    pub new_start: u32,
    /// Number of post-image lines the hunk covers.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create an empty hunk from header coordinates.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Reconstruct the `@@` header line from the four coordinates.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }

    /// Count of addition lines in the body.
    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Addition)
            .count()
    }

    /// Count of deletion lines in the body.
    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Deletion)
            .count()
    }
}

/// How a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileKind {
    /// Single-character status code, as shown in file lists.
    pub fn as_char(&self) -> char {
        match self {
            FileKind::Added => 'A',
            FileKind::Modified => 'M',
            FileKind::Deleted => 'D',
            FileKind::Renamed => 'R',
        }
    }
}

/// A single file's full change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Post-image path (pre-image path for deleted files).
    pub path: String,
    /// Pre-image path, when it differs from `path`.
    pub old_path: Option<String>,
    /// File status.
    pub kind: FileKind,
    /// Change hunks, non-overlapping and increasing by `old_start`.
    pub hunks: Vec<Hunk>,
    /// Original diff text for this file, kept only when no hunk parsed
    /// (binary or otherwise unparseable diffs) as a fallback render source.
    pub raw: Option<String>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create an empty file diff.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            kind: FileKind::Modified,
            hunks: Vec::new(),
            raw: None,
            additions: 0,
            deletions: 0,
        }
    }

    /// Display name for the file, showing `old → new` for renames.
    pub fn display_name(&self) -> String {
        match &self.old_path {
            Some(old) if old != &self.path => format!("{} → {}", old, self.path),
            _ => self.path.clone(),
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self.hunks.iter().map(Hunk::additions).sum();
        self.deletions = self.hunks.iter().map(Hunk::deletions).sum();
    }

    /// Total number of displayable lines, one extra per hunk for its header.
    pub fn total_lines(&self) -> usize {
        self.hunks.iter().map(|h| h.lines.len() + 1).sum()
    }
}
