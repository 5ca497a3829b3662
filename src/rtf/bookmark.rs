//! RTF bookmark support.
//!
//! Bookmarks are named locations in a document that can be referenced
//! by hyperlinks or cross-references. RTF marks them with a pair of
//! `{\*\bkmkstart name}` / `{\*\bkmkend name}` destinations, which end up as
//! two marker nodes in the tree.

/// Which end of a bookmarked range a marker denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkMarker {
    /// `\bkmkstart`
    Start,
    /// `\bkmkend`
    End,
}

/// A bookmark marker in an RTF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Bookmark name (unique identifier)
    pub name: String,
    /// Start or end marker
    pub marker: BookmarkMarker,
}

impl Bookmark {
    /// Create a new bookmark marker
    #[inline]
    pub fn new(name: impl Into<String>, marker: BookmarkMarker) -> Self {
        Self {
            name: name.into(),
            marker,
        }
    }

    /// Whether this marker opens the bookmarked range
    #[inline]
    pub fn is_start(&self) -> bool {
        self.marker == BookmarkMarker::Start
    }
}
