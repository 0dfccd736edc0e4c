use super::PageSource;
use crate::error::{Error, Result};
use crate::segmenter::{PageRange, SegmentError};
use log::debug;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// A PDF loaded from disk
pub struct PdfFile {
    path: PathBuf,
    doc: Document,
}

impl PdfFile {
    /// Load a PDF. Missing files are reported as `NotFound`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        debug!(
            "Loaded {} ({} pages)",
            path.display(),
            doc.get_pages().len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension, used as the base of split outputs
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }

    /// File name, the key bookmarks are stored under
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn check_page(&self, index: usize) -> Result<()> {
        let count = self.page_count();
        if index >= count {
            return Err(SegmentError::InvalidInput(format!(
                "page {} outside document of {} pages",
                index, count
            ))
            .into());
        }
        Ok(())
    }

    /// Copy of the document holding only the pages in `range`
    pub fn extract_range(&self, range: PageRange) -> Result<Document> {
        let count = self.page_count();
        if range.end() >= count {
            return Err(SegmentError::InvalidInput(format!(
                "range {} outside document of {} pages",
                range, count
            ))
            .into());
        }

        // lopdf numbers pages from 1
        let dropped: Vec<u32> = (0..count)
            .filter(|page| !range.contains(*page))
            .map(|page| page as u32 + 1)
            .collect();

        let mut doc = self.doc.clone();
        doc.delete_pages(&dropped);
        doc.prune_objects();
        doc.renumber_objects();
        doc.compress();
        Ok(doc)
    }

    /// Write the pages in `range` to a new PDF at `output`
    pub fn write_range(&self, range: PageRange, output: impl AsRef<Path>) -> Result<()> {
        let mut doc = self.extract_range(range)?;
        doc.save(output.as_ref())?;
        Ok(())
    }
}

impl PageSource for PdfFile {
    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.check_page(index)?;
        Ok(self.doc.extract_text(&[index as u32 + 1])?)
    }
}
