use std::ops::Range;

/// Pages shown side by side by default
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// A fixed-size window of consecutive pages, paged forward and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    size: usize,
    total: usize,
}

impl PageWindow {
    pub fn new(size: usize, total: usize) -> Self {
        Self {
            start: 0,
            size: size.max(1),
            total,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Advance a full window, only if the next window has a page in it
    pub fn next(&mut self) -> bool {
        if self.start + self.size < self.total {
            self.start += self.size;
            true
        } else {
            false
        }
    }

    /// Step back a full window, stopping at the first page
    pub fn prev(&mut self) -> bool {
        if self.start == 0 {
            return false;
        }
        self.start = self.start.saturating_sub(self.size);
        true
    }

    /// Page indices currently visible
    pub fn visible(&self) -> Range<usize> {
        self.start..(self.start + self.size).min(self.total)
    }

    /// Page shown in the given slot of the window, if any
    pub fn page_at(&self, slot: usize) -> Option<usize> {
        let page = self.start + slot;
        (slot < self.size && page < self.total).then_some(page)
    }

    /// 1-based summary, e.g. "Pages: 5-8 / 10"
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "Pages: 0-0 / 0".to_string();
        }
        let end = (self.start + self.size - 1).min(self.total - 1);
        format!("Pages: {}-{} / {}", self.start + 1, end + 1, self.total)
    }
}

/// Whether clicking a page bookmarks it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookmarkMode {
    enabled: bool,
}

impl BookmarkMode {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Page to bookmark for a click on `slot`, if bookmarking is on
    pub fn click(&self, window: &PageWindow, slot: usize) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        window.page_at(slot)
    }
}
