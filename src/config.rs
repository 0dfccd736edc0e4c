//! Runtime configuration.

use crate::error::{Error, Result};
use crate::segmenter::SECTION_BREAK;
use crate::session::DEFAULT_WINDOW_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by every command
///
/// Loaded from an optional JSON file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding imported PDFs and split outputs.
    /// Default: `pdf_files`.
    pub pdf_dir: PathBuf,

    /// SQLite file storing bookmarks.
    /// Default: `bookmarks.db`.
    pub database: PathBuf,

    /// Literal text marking a section break in edited page text.
    /// Default: `<<<SECTION_BREAK>>>`.
    pub marker: String,

    /// Clean text before writing it to spreadsheet cells.
    /// Default: true.
    pub clean_text: bool,

    /// Pages shown per viewer window.
    /// Default: 4.
    pub window_size: usize,

    /// Log filter used when `RUST_LOG` is unset.
    /// Default: `info`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("pdf_files"),
            database: PathBuf::from("bookmarks.db"),
            marker: SECTION_BREAK.to_string(),
            clean_text: true,
            window_size: DEFAULT_WINDOW_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no command can work with
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(Error::Config(
                "section marker must not be empty".to_string(),
            ));
        }
        if self.window_size == 0 {
            return Err(Error::Config(
                "window size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
