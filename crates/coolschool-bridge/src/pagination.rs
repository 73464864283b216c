/// Page navigation state of a paginated list (blog posts).
///
/// Pages are numbered from 1. The current page always stays within
/// `1..=pages`; a list without pages stays on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pages: usize,
    current_page: usize,
}

impl Pagination {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            current_page: 1,
        }
    }

    /// Builds pagination for `total` items shown `per_page` at a time.
    pub fn for_items(total: usize, per_page: usize) -> Self {
        Self::new(total.div_ceil(per_page.max(1)))
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn next_page(&mut self) {
        self.toggle_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.toggle_page(self.current_page.saturating_sub(1));
    }

    /// Jumps to `page`, clamped to the valid range.
    pub fn toggle_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.pages.max(1));
    }

    /// Index range of the items on the current page. Empty for a list
    /// without pages.
    pub fn item_range(&self, per_page: usize) -> std::ops::Range<usize> {
        if self.pages == 0 {
            return 0..0;
        }
        let start = (self.current_page - 1) * per_page;
        start..start + per_page
    }
}
