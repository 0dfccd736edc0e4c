// Public API exports
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod pdf;
pub mod segmenter;
pub mod session;

// Re-export main types for convenience
pub use error::{Error, Result};

pub use segmenter::{
    compute_ranges, join_pages, split_on_marker, CutSet, PageRange,
    SegmentError, SECTION_BREAK,
};

pub use pdf::{split_file_name, PageSource, PdfFile, PdfSplitter, SplitOutput};

pub use bookmarks::{page_label, parse_page_label, toggle, BookmarkDb, BookmarkStore};

pub use library::{Library, TreeNode};

pub use session::{BookmarkMode, PageWindow, Session};

pub use export::{bookmark_rows, clean_text_for_excel, marker_rows, SectionRow, XlsxWriter};

pub use config::Config;
