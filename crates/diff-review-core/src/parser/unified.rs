//! Parse unified diff format (as produced by `git diff` and friends).
//!
//! Parsing is best-effort by contract: lines that don't fit the unified-diff
//! grammar are skipped, never reported as errors. Text with no recognizable
//! hunk header parses to an empty model and the caller falls back to showing
//! the raw text.

use crate::model::{DiffLine, FileDiff, FileKind, Hunk};
use regex::Regex;
use std::sync::OnceLock;

/// The `@@ -old[,count] +new[,count] @@` hunk header. Omitted counts mean 1.
fn hunk_header_re() -> &'static Regex {
    static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();
    HUNK_HEADER
        .get_or_init(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap())
}

/// Parse the hunks of a single file's diff text.
///
/// File headers (`--- a/...`, `+++ b/...`, `diff --git ...`) and anything
/// else before the first hunk header are ignored; header extraction is the
/// caller's job (or [`parse_file_diffs`]'s). Inside a hunk body, lines are
/// classified by their marker character and numbered with two running
/// counters seeded from the hunk header. The body ends when the header's
/// per-side counts are consumed, so on multi-file input the next file's
/// `---`/`+++` headers never bleed into the previous hunk. `\`-prefixed
/// annotations such as `\ No newline at end of file` are kept as
/// [`crate::LineKind::Note`] lines; any other unrecognized line is dropped.
pub fn parse_hunks(diff_text: &str) -> Vec<Hunk> {
    let re = hunk_header_re();

    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;
    let mut old_line = 0u32;
    let mut new_line = 0u32;

    for line in diff_text.lines() {
        if let Some(caps) = re.captures(line) {
            if let Some(done) = current.take() {
                hunks.push(done);
            }
            let old_start = capture_u32(&caps, 1, 1);
            let old_count = capture_u32(&caps, 2, 1);
            let new_start = capture_u32(&caps, 3, 1);
            let new_count = capture_u32(&caps, 4, 1);
            old_line = old_start;
            new_line = new_start;
            current = Some(Hunk::new(old_start, old_count, new_start, new_count));
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            // Preamble before the first hunk header.
            continue;
        };

        // The body is bounded by the header counts. Once a side is exhausted,
        // marker look-alikes (the next file's `---`/`+++` headers) are not
        // body lines of this hunk.
        let old_open = old_line - hunk.old_start < hunk.old_count;
        let new_open = new_line - hunk.new_start < hunk.new_count;

        let mut chars = line.chars();
        match chars.next() {
            Some('+') if new_open => {
                hunk.lines.push(DiffLine::addition(chars.as_str(), new_line));
                new_line += 1;
            }
            Some('-') if old_open => {
                hunk.lines.push(DiffLine::deletion(chars.as_str(), old_line));
                old_line += 1;
            }
            Some(' ') if old_open && new_open => {
                hunk.lines
                    .push(DiffLine::context(chars.as_str(), old_line, new_line));
                old_line += 1;
                new_line += 1;
            }
            Some('\\') => {
                hunk.lines.push(DiffLine::note(chars.as_str()));
            }
            _ => {
                log::trace!("skipping line outside diff grammar: {:?}", line);
            }
        }
    }

    if let Some(done) = current.take() {
        hunks.push(done);
    }
    hunks
}

/// Parse a complete (possibly multi-file) diff into [`FileDiff`]s.
///
/// Splits the text into per-file sections on `diff --git` markers (falling
/// back to `---`/`+++` header pairs for plain `diff -u` output), extracts and
/// cleans the paths, classifies each file as added / modified / deleted /
/// renamed, and hands each section's body to [`parse_hunks`]. Sections that
/// yield no hunks (binary files, unparseable text) keep their raw text in
/// [`FileDiff::raw`] so the caller still has something to show.
pub fn parse_file_diffs(diff_text: &str) -> Vec<FileDiff> {
    split_file_sections(diff_text)
        .into_iter()
        .filter_map(parse_section)
        .collect()
}

fn parse_section(section: &str) -> Option<FileDiff> {
    let mut source: Option<String> = None;
    let mut target: Option<String> = None;
    let mut rename_from: Option<String> = None;
    let mut rename_to: Option<String> = None;
    let mut git_paths: Option<(String, String)> = None;

    // File metadata only appears before the first hunk header.
    for line in section.lines() {
        if hunk_header_re().is_match(line) {
            break;
        }
        if let Some(rest) = line.strip_prefix("diff --git ") {
            git_paths = parse_git_paths(rest);
        } else if let Some(rest) = line.strip_prefix("--- ") {
            source = Some(clean_path(rest));
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            target = Some(clean_path(rest));
        } else if let Some(rest) = line.strip_prefix("rename from ") {
            rename_from = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("rename to ") {
            rename_to = Some(rest.trim().to_string());
        }
    }

    // `---`/`+++` headers are authoritative; pure renames and binary diffs
    // don't carry them, so fall back to rename lines, then the git marker.
    let (source, target) = match (source, target) {
        (Some(s), Some(t)) => (s, t),
        _ => match (rename_from, rename_to) {
            (Some(f), Some(t)) => (f, t),
            _ => git_paths.unwrap_or_default(),
        },
    };

    let kind = determine_kind(&source, &target);
    let path = if is_null_path(&target) {
        source.clone()
    } else {
        target.clone()
    };

    let hunks = parse_hunks(section);
    if path.is_empty() && hunks.is_empty() {
        log::trace!("skipping diff section with no file header and no hunks");
        return None;
    }

    let mut file = FileDiff::new(path);
    file.kind = kind;
    // Deleted files reuse the pre-image path as `path`; only record
    // `old_path` when it genuinely differs.
    if !is_null_path(&source) && source != file.path {
        file.old_path = Some(source);
    }
    if hunks.is_empty() {
        file.raw = Some(section.to_string());
    }
    file.hunks = hunks;
    file.recalculate_stats();
    Some(file)
}

/// Split a multi-file diff into one text slice per file.
fn split_file_sections(text: &str) -> Vec<&str> {
    let mut lines: Vec<(usize, &str)> = Vec::new();
    let mut pos = 0;
    for line in text.split_inclusive('\n') {
        lines.push((pos, line));
        pos += line.len();
    }

    let git_style = lines.iter().any(|(_, l)| l.starts_with("diff --git "));

    let mut starts: Vec<usize> = Vec::new();
    if git_style {
        for (off, line) in &lines {
            if line.starts_with("diff --git ") {
                starts.push(*off);
            }
        }
    } else {
        // A `---`/`+++` pair only opens a file when it sits outside a hunk
        // body: a deletion of a line starting `-- ` followed by an addition
        // starting `++ ` looks identical inside one. Track how many body
        // lines the current hunk header still owes on each side.
        let re = hunk_header_re();
        let mut old_left = 0u32;
        let mut new_left = 0u32;
        for (idx, (off, line)) in lines.iter().enumerate() {
            if let Some(caps) = re.captures(line) {
                old_left = capture_u32(&caps, 2, 1);
                new_left = capture_u32(&caps, 4, 1);
                continue;
            }
            if old_left > 0 || new_left > 0 {
                match line.chars().next() {
                    Some('+') => new_left = new_left.saturating_sub(1),
                    Some('-') => old_left = old_left.saturating_sub(1),
                    Some(' ') => {
                        old_left = old_left.saturating_sub(1);
                        new_left = new_left.saturating_sub(1);
                    }
                    _ => {}
                }
                continue;
            }
            if line.starts_with("--- ")
                && lines
                    .get(idx + 1)
                    .is_some_and(|(_, next)| next.starts_with("+++ "))
            {
                starts.push(*off);
            }
        }
    }

    if starts.is_empty() {
        if text.trim().is_empty() {
            return Vec::new();
        }
        return vec![text];
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

fn determine_kind(source: &str, target: &str) -> FileKind {
    if is_null_path(source) {
        FileKind::Added
    } else if is_null_path(target) {
        FileKind::Deleted
    } else if source != target {
        FileKind::Renamed
    } else {
        FileKind::Modified
    }
}

fn is_null_path(path: &str) -> bool {
    path.is_empty() || path == "/dev/null"
}

/// Clean a header path: drop the `a/`/`b/` prefix git adds and the
/// tab-separated timestamp `diff -u` appends.
fn clean_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split('\t').next().unwrap_or(path);

    if path == "/dev/null" {
        return path.to_string();
    }
    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }
    path.to_string()
}

/// Extract `(a-path, b-path)` from the tail of a `diff --git` line.
fn parse_git_paths(rest: &str) -> Option<(String, String)> {
    let (a, b) = rest.split_once(' ')?;
    Some((clean_path(a), clean_path(b)))
}

fn capture_u32(caps: &regex::Captures<'_>, group: usize, default: u32) -> u32 {
    caps.get(group)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineKind;
    use pretty_assertions::assert_eq;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@
 fn main() {
     println!("Hello");
+    println!("World");
 }

diff --git a/src/lib.rs b/src/lib.rs
index 111222..333444 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,6 +10,5 @@
 impl Foo {
     fn bar(&self) {
-        // old comment
         self.do_thing();
     }
 }
"#;

    #[test]
    fn test_parse_simple_modify_scenario() {
        let text = "@@ -10,2 +10,2 @@\n unchanged line\n-old line\n+new line\n";
        let hunks = parse_hunks(text);

        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(
            (hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count),
            (10, 2, 10, 2)
        );
        assert_eq!(
            hunk.lines,
            vec![
                DiffLine::context("unchanged line", 10, 10),
                DiffLine::deletion("old line", 11),
                DiffLine::addition("new line", 11),
            ]
        );
    }

    #[test]
    fn test_parse_not_a_diff_yields_nothing() {
        assert!(parse_hunks("not a diff at all").is_empty());
        assert!(parse_hunks("").is_empty());
    }

    #[test]
    fn test_omitted_count_defaults_to_one() {
        let hunks = parse_hunks("@@ -5 +7 @@\n-gone\n+here\n");
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].old_start, 5);
        assert_eq!(hunks[0].old_count, 1);
        assert_eq!(hunks[0].new_start, 7);
        assert_eq!(hunks[0].new_count, 1);
    }

    #[test]
    fn test_malformed_header_is_not_a_boundary() {
        // Second "@@" line doesn't match the grammar, so its following lines
        // still belong to the first hunk... except non-marker lines are dropped.
        let text = "@@ -1,1 +1,1 @@\n-a\n+b\n@@ bogus header\n";
        let hunks = parse_hunks(text);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].lines.len(), 2);
    }

    #[test]
    fn test_no_newline_marker_becomes_note_line() {
        let text = "@@ -1,1 +1,1 @@\n-old\n+new\n\\ No newline at end of file\n";
        let hunks = parse_hunks(text);

        assert_eq!(hunks.len(), 1);
        let note = &hunks[0].lines[2];
        assert_eq!(note.kind, LineKind::Note);
        assert_eq!(note.content, " No newline at end of file");
        assert_eq!(note.old_line, None);
        assert_eq!(note.new_line, None);
    }

    #[test]
    fn test_line_count_invariant() {
        for hunk in parse_hunks(SAMPLE_DIFF) {
            let old = hunk
                .lines
                .iter()
                .filter(|l| matches!(l.kind, LineKind::Context | LineKind::Deletion))
                .count();
            let new = hunk
                .lines
                .iter()
                .filter(|l| matches!(l.kind, LineKind::Context | LineKind::Addition))
                .count();
            assert_eq!(old as u32, hunk.old_count);
            assert_eq!(new as u32, hunk.new_count);
        }
    }

    #[test]
    fn test_monotonic_line_numbers() {
        for hunk in parse_hunks(SAMPLE_DIFF) {
            let old_numbers: Vec<u32> = hunk.lines.iter().filter_map(|l| l.old_line).collect();
            let new_numbers: Vec<u32> = hunk.lines.iter().filter_map(|l| l.new_line).collect();

            assert_eq!(old_numbers.first(), Some(&hunk.old_start));
            assert_eq!(new_numbers.first(), Some(&hunk.new_start));
            assert!(old_numbers.windows(2).all(|w| w[0] < w[1]));
            assert!(new_numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_next_file_headers_are_not_body_lines() {
        // After the first file's hunk is complete, `--- a/src/lib.rs` and
        // `+++ b/src/lib.rs` belong to the next file, not the open hunk.
        let hunks = parse_hunks(SAMPLE_DIFF);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].lines.len(), 4);
        assert_eq!(hunks[0].lines.last().unwrap().content, "}");
        assert!(hunks[0]
            .lines
            .iter()
            .all(|l| !l.content.contains("src/lib.rs")));
    }

    #[test]
    fn test_parse_multi_file_diff() {
        let files = parse_file_diffs(SAMPLE_DIFF);
        assert_eq!(files.len(), 2);

        let first = &files[0];
        assert_eq!(first.path, "src/main.rs");
        assert_eq!(first.kind, FileKind::Modified);
        assert_eq!(first.additions, 1);
        assert_eq!(first.deletions, 0);
        assert_eq!(first.hunks.len(), 1);
        assert!(first.raw.is_none());

        let second = &files[1];
        assert_eq!(second.path, "src/lib.rs");
        assert_eq!(second.additions, 0);
        assert_eq!(second.deletions, 1);
    }

    #[test]
    fn test_parse_new_file() {
        let diff = r#"diff --git a/new_file.rs b/new_file.rs
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new_file.rs
@@ -0,0 +1,3 @@
+fn new_function() {
+    // new code
+}
"#;
        let files = parse_file_diffs(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind, FileKind::Added);
        assert_eq!(files[0].path, "new_file.rs");
        assert_eq!(files[0].old_path, None);
        assert_eq!(files[0].additions, 3);
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff = r#"diff --git a/old_file.rs b/old_file.rs
deleted file mode 100644
index abc1234..0000000
--- a/old_file.rs
+++ /dev/null
@@ -1,3 +0,0 @@
-fn old_function() {
-    // old code
-}
"#;
        let files = parse_file_diffs(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind, FileKind::Deleted);
        assert_eq!(files[0].path, "old_file.rs");
        // The pre-image path already serves as `path`; no redundant old_path.
        assert_eq!(files[0].old_path, None);
        assert_eq!(files[0].deletions, 3);
    }

    #[test]
    fn test_parse_renamed_file() {
        let diff = r#"diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    // old
+    // new
 }
"#;
        let files = parse_file_diffs(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "new_name.rs");
        assert_eq!(files[0].old_path, Some("old_name.rs".to_string()));
        assert_eq!(files[0].kind, FileKind::Renamed);
    }

    #[test]
    fn test_pure_rename_without_body() {
        let diff = "diff --git a/before.rs b/after.rs\nsimilarity index 100%\nrename from before.rs\nrename to after.rs\n";
        let files = parse_file_diffs(diff);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind, FileKind::Renamed);
        assert_eq!(files[0].path, "after.rs");
        assert_eq!(files[0].old_path, Some("before.rs".to_string()));
        assert!(files[0].hunks.is_empty());
        // No hunks: the raw section text is the fallback render source.
        assert!(files[0].raw.as_deref().unwrap().contains("similarity index"));
    }

    #[test]
    fn test_binary_file_keeps_raw_text() {
        let diff = "diff --git a/logo.png b/logo.png\nindex 1111111..2222222 100644\nBinary files a/logo.png and b/logo.png differ\n";
        let files = parse_file_diffs(diff);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "logo.png");
        assert!(files[0].hunks.is_empty());
        assert!(files[0].raw.as_deref().unwrap().contains("Binary files"));
    }

    #[test]
    fn test_plain_diff_u_headers() {
        let diff = "--- a/notes.txt\t2024-05-01 10:00:00\n+++ b/notes.txt\t2024-05-02 10:00:00\n@@ -1,1 +1,1 @@\n-old\n+new\n";
        let files = parse_file_diffs(diff);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "notes.txt");
        assert_eq!(files[0].kind, FileKind::Modified);
        assert_eq!(files[0].hunks.len(), 1);
    }

    #[test]
    fn test_dashed_body_lines_do_not_split_files() {
        // The hunk deletes a line starting `-- ` and adds one starting `++ `,
        // which renders as an adjacent `--- `/`+++ ` pair inside the body.
        let diff = "\
--- a/poem.txt
+++ b/poem.txt
@@ -1,2 +1,2 @@
--- dashes old
+++ plus new
 shared
";
        let files = parse_file_diffs(diff);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "poem.txt");
        assert_eq!(files[0].hunks.len(), 1);
        assert_eq!(
            files[0].hunks[0].lines,
            vec![
                DiffLine::deletion("-- dashes old", 1),
                DiffLine::addition("++ plus new", 1),
                DiffLine::context("shared", 2, 2),
            ]
        );
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
        assert_eq!(clean_path("a/notes.txt\t2024-05-01"), "notes.txt");
    }

    #[test]
    fn test_garbage_between_files_is_skipped() {
        let files = parse_file_diffs("warning: something odd\n");
        assert!(files.is_empty());
    }
}
