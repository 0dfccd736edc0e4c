mod document;
mod splitter;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::PdfFile;
pub use splitter::{split_file_name, PdfSplitter, SplitOutput};

use crate::error::Result;
use crate::segmenter::SegmentError;

/// Anything that can report a page count and per-page text
///
/// The segmenter only needs the count; text is used by the spreadsheet exports.
pub trait PageSource {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Text of the 0-based page `index`
    fn page_text(&self, index: usize) -> Result<String>;

    /// Text of every page, in order
    fn all_text(&self) -> Result<Vec<String>> {
        (0..self.page_count()).map(|i| self.page_text(i)).collect()
    }
}

/// Pages already extracted to memory, e.g. the edited texts of a session
impl PageSource for Vec<String> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.get(index).cloned().ok_or_else(|| {
            SegmentError::InvalidInput(format!(
                "page {} outside document of {} pages",
                index,
                self.len()
            ))
            .into()
        })
    }
}
