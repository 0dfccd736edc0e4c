use super::{PageSource, PdfFile};
use crate::error::Result;
use crate::segmenter::{compute_ranges, CutSet, PageRange};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// One file produced by a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
    pub path: PathBuf,
    pub range: PageRange,
}

/// Name of the `index`-th (0-based) split output of a document
///
/// Both the section number and the page numbers are 1-based:
/// `report_split_2_4-7.pdf`.
pub fn split_file_name(stem: &str, index: usize, range: PageRange) -> String {
    format!("{}_split_{}_{}.pdf", stem, index + 1, range)
}

/// Writes one PDF per section of a source document
pub struct PdfSplitter<'a> {
    source: &'a PdfFile,
    output_dir: PathBuf,
}

impl<'a> PdfSplitter<'a> {
    pub fn new(source: &'a PdfFile, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Compute the outputs a split would produce without writing anything
    pub fn plan(&self, cuts: &CutSet) -> Result<Vec<SplitOutput>> {
        let stem = self.source.stem();
        let ranges = compute_ranges(self.source.page_count(), cuts)?;

        Ok(ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| SplitOutput {
                path: self.output_dir.join(split_file_name(&stem, i, range)),
                range,
            })
            .collect())
    }

    /// Write every section to its own file
    ///
    /// The output directory is created if missing. Outputs are returned in
    /// page order.
    pub fn split(&self, cuts: &CutSet) -> Result<Vec<SplitOutput>> {
        let outputs = self.plan(cuts)?;

        fs::create_dir_all(&self.output_dir)?;

        for output in &outputs {
            debug!(
                "Writing pages {} to {}",
                output.range,
                output.path.display()
            );
            self.source.write_range(output.range, &output.path)?;
        }

        info!(
            "Split {} into {} files in {}",
            self.source.path().display(),
            outputs.len(),
            self.output_dir.display()
        );

        Ok(outputs)
    }
}
