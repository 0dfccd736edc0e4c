mod db;

#[cfg(test)]
mod tests;

pub use db::BookmarkDb;

use crate::error::Result;
use crate::segmenter::CutSet;

/// Persistent bookmarks keyed by document id (the PDF's file name)
///
/// Pages are 0-based. A bookmark marks the first page of a new section.
pub trait BookmarkStore {
    /// All bookmarked pages of a document
    fn load(&self, document: &str) -> Result<CutSet>;

    /// Bookmark a page. Returns false if it was already bookmarked.
    fn add(&self, document: &str, page: usize) -> Result<bool>;

    /// Drop a bookmark. Returns false if there was none.
    fn remove(&self, document: &str, page: usize) -> Result<bool>;

    /// Drop every bookmark of a document and return how many there were
    fn clear(&self, document: &str) -> Result<usize>;

    /// Documents that have at least one bookmark
    fn documents(&self) -> Result<Vec<String>>;
}

/// Flip a bookmark and return whether the page is now bookmarked
pub fn toggle(store: &dyn BookmarkStore, document: &str, page: usize) -> Result<bool> {
    if store.remove(document, page)? {
        Ok(false)
    } else {
        store.add(document, page)?;
        Ok(true)
    }
}

/// Label shown for a bookmark, 1-based ("Page 4" for index 3)
pub fn page_label(page: usize) -> String {
    format!("Page {}", page + 1)
}

/// Inverse of `page_label`
pub fn parse_page_label(label: &str) -> Option<usize> {
    let number: usize = label.trim().strip_prefix("Page")?.trim().parse().ok()?;
    number.checked_sub(1)
}
