use super::SegmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inclusive, 0-based span of pages forming one output section
///
/// `start <= end` always holds; deserialization goes through the same check
/// as `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPageRange")]
pub struct PageRange {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawPageRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawPageRange> for PageRange {
    type Error = SegmentError;

    fn try_from(raw: RawPageRange) -> Result<Self, Self::Error> {
        PageRange::new(raw.start, raw.end)
    }
}

impl PageRange {
    /// Range over `start..=end`. Rejects `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self, SegmentError> {
        if start > end {
            return Err(SegmentError::InvalidInput(format!(
                "range start {} after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// First page of the section
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last page of the section (inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of pages covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A range always covers at least one page
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the 0-based page indices in this range
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn contains(&self, page: usize) -> bool {
        self.start <= page && page <= self.end
    }
}

/// Renders 1-based, the way page numbers appear in output file names
impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

/// Set of page indices, each marking the first page of a new section
///
/// Ordered and deduplicated by construction, so insertion order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSet {
    cuts: BTreeSet<usize>,
}

impl CutSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cut point. Returns false if it was already present.
    pub fn insert(&mut self, page: usize) -> bool {
        self.cuts.insert(page)
    }

    /// Remove a cut point. Returns false if it was not present.
    pub fn remove(&mut self, page: usize) -> bool {
        self.cuts.remove(&page)
    }

    /// Flip a cut point and return whether it is now set
    pub fn toggle(&mut self, page: usize) -> bool {
        if self.cuts.remove(&page) {
            false
        } else {
            self.cuts.insert(page);
            true
        }
    }

    pub fn contains(&self, page: usize) -> bool {
        self.cuts.contains(&page)
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Cut points in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cuts.iter().copied()
    }

    pub fn first(&self) -> Option<usize> {
        self.cuts.first().copied()
    }

    /// Check every cut point lies in `[0, page_count)`
    pub fn validate(&self, page_count: usize) -> Result<(), SegmentError> {
        if page_count == 0 {
            return Err(SegmentError::InvalidInput(
                "document has no pages".to_string(),
            ));
        }

        match self.cuts.last() {
            Some(&cut) if cut >= page_count => Err(SegmentError::InvalidInput(format!(
                "cut point {} outside [0, {})",
                cut, page_count
            ))),
            _ => Ok(()),
        }
    }
}

impl FromIterator<usize> for CutSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            cuts: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for CutSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.cuts.extend(iter);
    }
}

/// Partition `[0, page_count)` into contiguous sections starting at each cut
///
/// Pages before the first cut form their own leading section. A cut at 0
/// produces no empty leading section. With no cuts the whole document is a
/// single section.
///
/// # Errors
/// `InvalidInput` when `page_count` is zero or a cut lies past the last page.
pub fn compute_ranges(page_count: usize, cuts: &CutSet) -> Result<Vec<PageRange>, SegmentError> {
    cuts.validate(page_count)?;

    let mut ranges = Vec::with_capacity(cuts.len() + 1);
    let mut starts: Vec<usize> = cuts.iter().collect();

    if starts.first().map_or(true, |&first| first > 0) {
        starts.insert(0, 0);
    }

    for (i, &start) in starts.iter().enumerate() {
        let end = match starts.get(i + 1) {
            Some(&next) => next - 1,
            None => page_count - 1,
        };
        ranges.push(PageRange { start, end });
    }

    Ok(ranges)
}

/// Concatenate the texts of every page in `range`
///
/// Pages missing from `texts` contribute nothing.
pub fn join_pages<S: AsRef<str>>(texts: &[S], range: PageRange) -> String {
    range
        .pages()
        .filter_map(|page| texts.get(page))
        .map(|text| text.as_ref())
        .collect()
}
