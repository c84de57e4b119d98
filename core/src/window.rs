use crate::PageCache;
use crate::PagerConfig;
use catalog_protocol::AssetSummary;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::debug;

/// Half-open range of absolute row positions `[first, last)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub first: usize,
    pub last: usize,
}

impl Window {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.first, self.last)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// What a single scroll step needs before its window may be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPlan {
    /// Window to commit once every page in `first_page..=last_page` is
    /// resident.
    pub candidate: Window,
    pub first_page: usize,
    pub last_page: usize,
    /// The page scrolling toward may newly require.
    pub required_page: usize,
    /// The page one step behind the movement, safe to drop right away.
    pub droppable_page: Option<usize>,
}

impl ScrollPlan {
    /// Pages the candidate window reads from. Wider than two pages only when
    /// the display is longer than a page.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first_page..=self.last_page
    }
}

/// Owns the row window and maps it onto pages of a fixed size.
///
/// Planning a scroll never mutates the window; the window only moves through
/// [`WindowController::commit`] or through short-row repair in
/// [`WindowController::rows_for`].
#[derive(Debug, Clone)]
pub struct WindowController {
    window: Window,
    page_size: usize,
    display_count: usize,
    step_size: usize,
}

impl WindowController {
    /// Controller for a freshly issued query whose first page held
    /// `first_page_len` rows. That length becomes the page size; an empty
    /// first page leaves the configured default in place.
    ///
    /// A first page shorter than the service's real page size means the
    /// results ended inside it. Later page indices then no longer line up
    /// with the service's, but every one of them is empty on both sides, so
    /// the single extra request for page 1 comes back empty and stays cached.
    pub fn new(config: &PagerConfig, first_page_len: usize) -> Self {
        let page_size = if first_page_len == 0 {
            config.default_page_size.max(1)
        } else {
            first_page_len
        };
        Self {
            window: Window::new(0, first_page_len.min(config.display_count)),
            page_size,
            display_count: config.display_count,
            step_size: config.step_size,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn page_of(&self, row: usize) -> usize {
        row / self.page_size
    }

    pub fn plan_scroll(&self, direction: ScrollDirection) -> ScrollPlan {
        let first = match direction {
            ScrollDirection::Forward => self.window.first.saturating_add(self.step_size),
            ScrollDirection::Backward => self.window.first.saturating_sub(self.step_size),
        };
        let candidate = Window::new(first, first.saturating_add(self.display_count));
        let first_page = self.page_of(candidate.first);
        let last_page = self.page_of(candidate.last);
        let (required_page, droppable_page) = match direction {
            ScrollDirection::Forward => (last_page, first_page.checked_sub(1)),
            ScrollDirection::Backward => (first_page, last_page.checked_add(1)),
        };
        ScrollPlan {
            candidate,
            first_page,
            last_page,
            required_page,
            droppable_page,
        }
    }

    /// Pages the committed window reads from.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.page_of(self.window.first)..=self.page_of(self.window.last)
    }

    pub fn commit(&mut self, window: Window) {
        debug!(from = %self.window, to = %window, "window committed");
        self.window = window;
    }

    /// Rows of the committed window.
    pub fn current_rows(&mut self, pages: &PageCache) -> Vec<AssetSummary> {
        let Window { first, last } = self.window;
        self.rows_for(pages, first, last)
    }

    /// Rows visible for `[first, last)` given the resident `pages`.
    ///
    /// When fewer than `display_count` rows are available past `first` the
    /// window is pulled back by the shortfall and persisted, which keeps the
    /// view full at the end of a result set. At `first == 0` whatever exists
    /// is returned as is.
    pub fn rows_for(&mut self, pages: &PageCache, first: usize, last: usize) -> Vec<AssetSummary> {
        let mut first = first;
        let mut last = last;
        loop {
            let rows = self.collect(pages, first, last);
            if rows.len() >= self.display_count || first == 0 {
                return rows;
            }
            let shortfall = self.display_count - rows.len();
            first = first.saturating_sub(shortfall);
            last = first + self.display_count;
            debug!(first, last, shortfall, "repairing short window");
            self.window = Window::new(first, last);
        }
    }

    /// Contiguous rows from `first`, stopping at the first page that is not
    /// resident or runs out before the window does.
    fn collect(&self, pages: &PageCache, first: usize, last: usize) -> Vec<AssetSummary> {
        let wanted = last.saturating_sub(first).min(self.display_count);
        let mut rows: Vec<AssetSummary> = Vec::with_capacity(wanted);
        while rows.len() < wanted {
            let position = first + rows.len();
            let Some(page) = pages.get(self.page_of(position)) else {
                break;
            };
            let offset = position % self.page_size;
            let before = rows.len();
            rows.extend(
                page.rows
                    .iter()
                    .take(self.page_size)
                    .skip(offset)
                    .take(wanted - before)
                    .cloned(),
            );
            if rows.len() == before {
                break;
            }
        }
        rows
    }
}
