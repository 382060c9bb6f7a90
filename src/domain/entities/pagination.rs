use serde::Serialize;

/// A resolved page position: the requested number clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub per_page: i64,
}

impl PageWindow {
    /// Non-numeric input resolves to page 1; numbers below 1 or past the
    /// last page clamp to the nearest valid page. Zero records still yield
    /// one (empty) page.
    pub fn resolve(raw: Option<&str>, total: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let num_pages = ((total.max(0) + per_page - 1) / per_page).max(1);
        let requested = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(1);

        PageWindow {
            number: requested.clamp(1, num_pages),
            num_pages,
            per_page,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub per_page: i64,
    pub total: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<i64>,
    pub next_page_number: Option<i64>,
    pub page_range: Vec<i64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total: i64) -> Self {
        let has_previous = window.number > 1;
        let has_next = window.number < window.num_pages;

        Page {
            items,
            number: window.number,
            num_pages: window.num_pages,
            per_page: window.per_page,
            total,
            has_previous,
            has_next,
            previous_page_number: has_previous.then(|| window.number - 1),
            next_page_number: has_next.then(|| window.number + 1),
            page_range: (1..=window.num_pages).collect(),
        }
    }

    pub fn empty(per_page: i64) -> Self {
        Page::new(Vec::new(), PageWindow::resolve(None, 0, per_page), 0)
    }
}
