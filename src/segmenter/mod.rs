mod error;
mod marker;
mod ranges;

#[cfg(test)]
mod tests;

pub use error::SegmentError;
pub use marker::{split_on_marker, SECTION_BREAK};
pub use ranges::{compute_ranges, join_pages, CutSet, PageRange};
