use crate::segmenter::SegmentError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the adapters around the segmenter
///
/// Segmentation errors stay in their own variant so callers can tell a bad
/// cut set apart from a missing file or a broken PDF.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Bookmark storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
