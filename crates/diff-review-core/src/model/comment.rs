//! Review annotations anchored to diff lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review comment anchored to one line of one hunk.
///
/// Comments live alongside the parsed diff, never inside it: the anchor is a
/// `(hunk_index, line_index)` coordinate into the caller's `Vec<Hunk>`, and
/// removing a comment never touches the diff model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffComment {
    /// Unique identifier for this comment.
    pub id: Uuid,
    /// Index of the hunk the comment is anchored to.
    pub hunk_index: usize,
    /// Index into that hunk's `lines`.
    pub line_index: usize,
    /// Comment body.
    pub content: String,
    /// Author, when known.
    pub author: Option<String>,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

impl DiffComment {
    /// Create a new comment at the given coordinate.
    pub fn new(hunk_index: usize, line_index: usize, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            hunk_index,
            line_index,
            content: content.into(),
            author: None,
            created_at: Utc::now(),
        }
    }

    /// Attach an author name.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// The `(hunk_index, line_index)` anchor coordinate.
    pub fn anchor(&self) -> (usize, usize) {
        (self.hunk_index, self.line_index)
    }
}

/// A caller-owned collection of comments for one file's diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentList {
    comments: Vec<DiffComment>,
}

impl CommentList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment, returning its id.
    pub fn add(&mut self, comment: DiffComment) -> Uuid {
        let id = comment.id;
        self.comments.push(comment);
        id
    }

    /// Remove a comment by id. Returns whether a comment was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != id);
        self.comments.len() != before
    }

    /// Drop every comment anchored to the given hunk
    /// (the hunk was discarded by the reviewer).
    pub fn discard_hunk(&mut self, hunk_index: usize) {
        self.comments.retain(|c| c.hunk_index != hunk_index);
    }

    /// Comments anchored to a specific line, in creation order.
    pub fn at(&self, hunk_index: usize, line_index: usize) -> impl Iterator<Item = &DiffComment> {
        self.comments
            .iter()
            .filter(move |c| c.hunk_index == hunk_index && c.line_index == line_index)
    }

    /// All comments, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DiffComment> {
        self.comments.iter()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_anchor() {
        let comment = DiffComment::new(2, 5, "looks wrong").with_author("reviewer");
        assert_eq!(comment.anchor(), (2, 5));
        assert_eq!(comment.author.as_deref(), Some("reviewer"));
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = CommentList::new();
        let id = list.add(DiffComment::new(0, 1, "nit"));
        assert_eq!(list.len(), 1);

        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_lookup_by_line() {
        let mut list = CommentList::new();
        list.add(DiffComment::new(0, 1, "first"));
        list.add(DiffComment::new(0, 1, "second"));
        list.add(DiffComment::new(1, 0, "elsewhere"));

        let here: Vec<_> = list.at(0, 1).map(|c| c.content.as_str()).collect();
        assert_eq!(here, vec!["first", "second"]);
        assert_eq!(list.at(3, 3).count(), 0);
    }

    #[test]
    fn test_discard_hunk_drops_its_comments() {
        let mut list = CommentList::new();
        list.add(DiffComment::new(0, 1, "kept"));
        list.add(DiffComment::new(1, 0, "dropped"));
        list.add(DiffComment::new(1, 4, "also dropped"));

        list.discard_hunk(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().content, "kept");
    }
}
