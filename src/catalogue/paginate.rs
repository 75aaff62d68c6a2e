use serde::Serialize;
use utoipa::ToSchema;

/// Number of page buttons shown around the current page.
pub const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_items: 0,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slice of the 1-based `page`. Out-of-range pages yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageButton {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Page buttons for the pagination bar: a window of up to
/// [`MAX_VISIBLE_PAGES`] pages around `current_page`, plus the first and last
/// pages when they fall outside it.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageButton> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current_page = current_page.clamp(1, total_pages);
    let mut start = current_page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start < MAX_VISIBLE_PAGES - 1 {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    let mut buttons = Vec::with_capacity(MAX_VISIBLE_PAGES + 4);
    if start > 1 {
        buttons.push(PageButton::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            buttons.push(PageButton::Ellipsis);
        }
    }

    buttons.extend((start..=end).map(|number| PageButton::Page {
        number,
        current: number == current_page,
    }));

    if end < total_pages {
        if end < total_pages - 1 {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(PageButton::Page {
            number: total_pages,
            current: false,
        });
    }

    buttons
}
