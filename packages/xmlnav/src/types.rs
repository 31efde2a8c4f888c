//! Handle and result types handed out by the navigator.
//!
//! Handles are plain `Copy` values. They own nothing; every navigator call
//! checks them against the registry of loaded documents.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Source of document ids, shared by every navigator in the process.
static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a loaded document.
///
/// Ids come from a process-wide counter that only moves forward, so an id is
/// never reused and never shared between two [`Navigator`](crate::Navigator)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocumentId(u64);

impl DocumentId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate an id no other document in this process has had.
    pub(crate) fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Position of an element within its document's arena (document order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The root element is always the first element in document order.
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Handle to a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle {
    id: DocumentId,
}

impl DocumentHandle {
    pub(crate) const fn new(id: DocumentId) -> Self {
        Self { id }
    }

    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }
}

/// Handle to an element: a document id plus a tree position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    document: DocumentId,
    index: NodeIndex,
}

impl NodeHandle {
    pub(crate) const fn new(document: DocumentId, index: NodeIndex) -> Self {
        Self { document, index }
    }

    /// Id of the document this node belongs to.
    #[must_use]
    pub const fn document(&self) -> DocumentId {
        self.document
    }

    /// Position of this node in document order.
    #[must_use]
    pub const fn index(&self) -> NodeIndex {
        self.index
    }
}

/// Owned text result with an explicit truncation flag.
///
/// A truncated result is still a successful one; `text` then holds the
/// longest prefix that fits the document's `max_text_len`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BoundedText {
    pub text: String,
    pub truncated: bool,
}

impl BoundedText {
    /// Copy `text`, cutting it to at most `limit` bytes on a char boundary.
    ///
    /// # Examples
    /// ```
    /// use xmlnav::BoundedText;
    ///
    /// let full = BoundedText::bounded("hello", Some(16));
    /// assert_eq!(full.text, "hello");
    /// assert!(!full.truncated);
    ///
    /// let cut = BoundedText::bounded("hello", Some(3));
    /// assert_eq!(cut.text, "hel");
    /// assert!(cut.truncated);
    /// ```
    #[must_use]
    pub fn bounded(text: &str, limit: Option<usize>) -> Self {
        match limit {
            Some(limit) if text.len() > limit => {
                let mut end = limit;
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                Self {
                    text: text[..end].to_string(),
                    truncated: true,
                }
            }
            _ => Self {
                text: text.to_string(),
                truncated: false,
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<&str> for BoundedText {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_without_limit() {
        let text = BoundedText::bounded("anything at all", None);
        assert_eq!(text, "anything at all");
        assert!(!text.truncated);
    }

    #[test]
    fn test_bounded_exact_fit_is_not_truncated() {
        let text = BoundedText::bounded("abc", Some(3));
        assert_eq!(text, "abc");
        assert!(!text.truncated);
    }

    #[test]
    fn test_bounded_respects_char_boundaries() {
        // "é" is two bytes; a limit of 2 cannot include half of it
        let text = BoundedText::bounded("aé", Some(2));
        assert_eq!(text, "a");
        assert!(text.truncated);
    }

    #[test]
    fn test_bounded_zero_limit() {
        let text = BoundedText::bounded("abc", Some(0));
        assert!(text.is_empty());
        assert!(text.truncated);

        let empty = BoundedText::bounded("", Some(0));
        assert!(!empty.truncated);
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = DocumentId::next();
        let b = DocumentId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_handles_compare_by_document_and_index() {
        let a = NodeHandle::new(DocumentId::new(1), NodeIndex::new(3));
        let b = NodeHandle::new(DocumentId::new(2), NodeIndex::new(3));
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
        assert_eq!(a.document().get(), 1);
    }
}
