use super::clean_text_for_excel;
use crate::error::Result;
use crate::pdf::PageSource;
use crate::segmenter::{compute_ranges, join_pages, split_on_marker, CutSet};
use crate::session::Session;
use log::debug;
use serde::Serialize;
use std::path::Path;

/// One exported section: the document it came from and its text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRow {
    pub file: String,
    pub content: String,
}

impl SectionRow {
    fn new(file: &str, content: String, clean: bool) -> Self {
        let content = if clean {
            clean_text_for_excel(&content)
        } else {
            content
        };
        Self {
            file: file.to_string(),
            content,
        }
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Rows for every selected document, split on inline section markers
///
/// Each document's page texts are joined with newlines before splitting.
/// Selected documents with no loaded text are skipped.
pub fn marker_rows(session: &Session, marker: &str, clean: bool) -> Vec<SectionRow> {
    let mut rows = Vec::new();

    for path in &session.selected_files {
        let Some(text) = session.joined_text(path) else {
            debug!("No content loaded for {}, skipping", path);
            continue;
        };

        let file = display_name(path);
        rows.extend(
            split_on_marker(&text, marker)
                .into_iter()
                .map(|section| SectionRow::new(&file, section, clean)),
        );
    }

    rows
}

/// Rows for the bookmark-delimited sections of one document
///
/// Each section's text is its pages' texts concatenated in order.
pub fn bookmark_rows(
    file: &str,
    source: &dyn PageSource,
    cuts: &CutSet,
    clean: bool,
) -> Result<Vec<SectionRow>> {
    let ranges = compute_ranges(source.page_count(), cuts)?;
    let texts = source.all_text()?;
    let file = display_name(file);

    Ok(ranges
        .into_iter()
        .map(|range| SectionRow::new(&file, join_pages(&texts, range), clean))
        .collect())
}
