use crate::error::{Error, Result};
use crate::pdf::PageSource;
use crate::segmenter::SECTION_BREAK;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Editing context for the text-split workflow
///
/// Holds the extracted (and possibly edited) text of every opened document,
/// keyed by path, plus which document and page are current. Serialized as
/// JSON for save/load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub pdf_dir: String,
    pub selected_files: Vec<String>,
    pub current_pdf: Option<String>,
    pub current_page: usize,
    pub pdf_content: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl Session {
    pub fn new(pdf_dir: impl Into<String>) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
            ..Self::default()
        }
    }

    /// Make `path` the current document, starting at its first page
    ///
    /// Texts of a document that is already loaded are kept, so edits survive
    /// switching back and forth.
    pub fn open_document(&mut self, path: &str, pages: Vec<String>) {
        self.pdf_content.entry(path.to_string()).or_insert(pages);
        self.current_pdf = Some(path.to_string());
        self.current_page = 0;
    }

    /// Like `open_document`, extracting text from `source` only on first open
    pub fn open_source(&mut self, path: &str, source: &dyn PageSource) -> Result<()> {
        let pages = if self.pdf_content.contains_key(path) {
            Vec::new()
        } else {
            source.all_text()?
        };
        self.open_document(path, pages);
        Ok(())
    }

    /// Replace the selection. A single selected document becomes current.
    pub fn select(&mut self, paths: Vec<String>) {
        if let [only] = paths.as_slice() {
            if self.pdf_content.contains_key(only) {
                self.current_pdf = Some(only.clone());
                self.current_page = 0;
            }
        }
        self.selected_files = paths;
    }

    /// Move to `page` of a loaded document, leaving the selection as it is
    ///
    /// Returns false, changing nothing, if the document is not loaded or has
    /// no such page.
    pub fn focus(&mut self, path: &str, page: usize) -> bool {
        match self.pdf_content.get(path) {
            Some(pages) if page < pages.len() => {
                self.current_pdf = Some(path.to_string());
                self.current_page = page;
                true
            }
            _ => false,
        }
    }

    pub fn page_count(&self) -> usize {
        self.current_pdf
            .as_ref()
            .and_then(|path| self.pdf_content.get(path))
            .map_or(0, Vec::len)
    }

    pub fn current_text(&self) -> Option<&str> {
        let path = self.current_pdf.as_ref()?;
        self.pdf_content
            .get(path)?
            .get(self.current_page)
            .map(String::as_str)
    }

    /// Store edited text for the current page (trimmed)
    pub fn set_current_text(&mut self, text: &str) -> bool {
        let page = self.current_page;
        match self.current_page_mut(page) {
            Some(slot) => {
                *slot = text.trim().to_string();
                true
            }
            None => false,
        }
    }

    fn current_page_mut(&mut self, page: usize) -> Option<&mut String> {
        let path = self.current_pdf.as_ref()?;
        self.pdf_content.get_mut(path)?.get_mut(page)
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page + 1 < self.page_count() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Insert a section break at a char offset of the current page
    ///
    /// Offsets past the end append. Returns false without a current page.
    pub fn insert_break(&mut self, offset: usize) -> bool {
        let page = self.current_page;
        let Some(text) = self.current_page_mut(page) else {
            return false;
        };

        let byte_idx = text
            .char_indices()
            .nth(offset)
            .map_or(text.len(), |(idx, _)| idx);
        text.insert_str(byte_idx, SECTION_BREAK);
        debug!("Inserted section break on page {} at {}", page, offset);
        true
    }

    /// Page texts of a document joined with newlines
    pub fn joined_text(&self, path: &str) -> Option<String> {
        self.pdf_content.get(path).map(|pages| pages.join("\n"))
    }

    /// Forget a document, e.g. after its file was deleted
    pub fn remove_document(&mut self, path: &str) {
        self.pdf_content.remove(path);
        self.selected_files.retain(|p| p != path);
        if self.current_pdf.as_deref() == Some(path) {
            self.current_pdf = None;
            self.current_page = 0;
        }
    }

    /// Write the session as JSON
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        self.saved_at = Some(Utc::now().to_rfc3339());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Session saved to {}", path.display());
        Ok(())
    }

    /// Read a session written by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let mut session: Session = serde_json::from_str(&contents)?;

        // A hand-edited file may point past the end of the document
        let pages = session.page_count();
        if session.current_page >= pages {
            session.current_page = pages.saturating_sub(1);
        }

        info!("Session loaded from {}", path.display());
        Ok(session)
    }
}
