//! Token-level alignment of a removed line against its paired added line.
//!
//! Used to highlight only the changed sub-spans of a modified line instead of
//! the whole line. Alignment is a classic longest-common-subsequence DP over
//! tokens, O(m·n) in the two token counts, so callers should feed it line
//! pairs, not whole files.

use serde::{Deserialize, Serialize};

/// Whether a segment is shared between the two lines or unique to one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Present on both sides.
    Equal,
    /// Present only on this side.
    Change,
}

/// A run of adjacent tokens with the same classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSegment {
    /// Concatenated token text.
    pub text: String,
    /// Segment classification.
    pub kind: SegmentKind,
}

/// The alignment result for one removed/added line pair.
///
/// Concatenating `old_segments` texts reproduces the old line exactly, and
/// likewise for `new_segments`; tokenization is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub old_segments: Vec<InlineSegment>,
    pub new_segments: Vec<InlineSegment>,
}

/// Punctuation characters that form their own token runs.
const PUNCTUATION: &str = ",.()[]{}<>:+-/*=";

/// Compute which sub-spans of `old_text` and `new_text` are shared.
///
/// Total and deterministic: any two strings (including empty ones) produce a
/// valid segment pair, and equal inputs produce a single `Equal` segment on
/// each side.
pub fn align_pair(old_text: &str, new_text: &str) -> AlignedPair {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);
    let m = old_tokens.len();
    let n = new_tokens.len();

    // dp[i][j] = LCS length of the token suffixes starting at i and j.
    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            dp[i][j] = if old_tokens[i] == new_tokens[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    // Greedy table-guided walk from the front. Ties prefer consuming the old
    // side, which keeps the output reproducible byte for byte.
    let mut old_segments = SegmentBuilder::new();
    let mut new_segments = SegmentBuilder::new();
    let mut i = 0;
    let mut j = 0;
    while i < m && j < n {
        if old_tokens[i] == new_tokens[j] {
            old_segments.push(SegmentKind::Equal, old_tokens[i]);
            new_segments.push(SegmentKind::Equal, new_tokens[j]);
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            old_segments.push(SegmentKind::Change, old_tokens[i]);
            i += 1;
        } else {
            new_segments.push(SegmentKind::Change, new_tokens[j]);
            j += 1;
        }
    }
    while i < m {
        old_segments.push(SegmentKind::Change, old_tokens[i]);
        i += 1;
    }
    while j < n {
        new_segments.push(SegmentKind::Change, new_tokens[j]);
        j += 1;
    }

    AlignedPair {
        old_segments: old_segments.finish(),
        new_segments: new_segments.finish(),
    }
}

/// Split `text` into maximal runs of word characters, whitespace, or
/// punctuation. Separators are kept as tokens, so concatenating the result
/// reproduces `text`.
fn tokenize(text: &str) -> Vec<&str> {
    #[derive(PartialEq, Clone, Copy)]
    enum Class {
        Space,
        Punct,
        Word,
    }

    fn class_of(c: char) -> Class {
        if c.is_whitespace() {
            Class::Space
        } else if PUNCTUATION.contains(c) {
            Class::Punct
        } else {
            Class::Word
        }
    }

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<Class> = None;

    for (offset, c) in text.char_indices() {
        let class = class_of(c);
        match current {
            Some(prev) if prev == class => {}
            Some(_) => {
                tokens.push(&text[start..offset]);
                start = offset;
                current = Some(class);
            }
            None => current = Some(class),
        }
    }
    if current.is_some() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Accumulates tokens into segments, coalescing adjacent same-kind runs.
struct SegmentBuilder {
    segments: Vec<InlineSegment>,
}

impl SegmentBuilder {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push(&mut self, kind: SegmentKind, token: &str) {
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => self.segments.push(InlineSegment {
                text: token.to_string(),
                kind,
            }),
        }
    }

    fn finish(self) -> Vec<InlineSegment> {
        self.segments
    }
}
