//! Pagination over in-memory collections.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page_number: usize,
    items_per_page: usize,
}

impl PageRequest {
    /// Both fields are clamped to at least 1.
    pub fn new(page_number: usize, items_per_page: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 5)
    }
}

/// One page of a collection plus the metadata a table footer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// The served page after clamping into `[1, max(total_pages, 1)]`.
    pub page_number: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 0-based slice bounds into the (filtered) collection.
    pub start_index: usize,
    pub end_index: usize,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice one page out of `items`.
///
/// `total_pages = ceil(total_items / items_per_page)`; the requested page is
/// clamped into range first, so an out-of-range request serves the nearest
/// valid page rather than an empty one. An empty collection yields an empty
/// page 1.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> PageResult<T> {
    let total_items = items.len();
    let items_per_page = request.items_per_page();
    let total_pages = total_items.div_ceil(items_per_page);
    let page_number = request.page_number().clamp(1, total_pages.max(1));
    let start_index = (page_number - 1) * items_per_page;
    let end_index = (start_index + items_per_page).min(total_items);
    let page_items = if start_index < end_index {
        items[start_index..end_index].to_vec()
    } else {
        Vec::new()
    };

    PageResult {
        items: page_items,
        page_number,
        items_per_page,
        total_items,
        total_pages,
        start_index,
        end_index,
    }
}
