//! List projection: filter, optional partitioning, pagination.

use crate::page::{PageRequest, PageResult, paginate};

/// Filter then paginate a collection.
pub fn project<T, F>(items: &[T], filter: F, request: PageRequest) -> PageResult<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let filtered: Vec<T> = items.iter().filter(|item| filter(item)).cloned().collect();
    paginate(&filtered, request)
}

/// One named partition of a filtered collection, paginated on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<L, T> {
    pub label: L,
    pub page: PageResult<T>,
}

/// Filter, split into named partitions, and paginate each independently.
///
/// Screens that show "active" and "cancelled" side by side page each group
/// separately; `page_for` supplies the page request per label. Partitions
/// appear in first-seen order over the filtered items, so an empty group
/// simply does not appear.
pub fn project_partitioned<T, L, F, R, P>(
    items: &[T],
    filter: F,
    rule: R,
    page_for: P,
) -> Vec<Partition<L, T>>
where
    T: Clone,
    L: PartialEq,
    F: Fn(&T) -> bool,
    R: Fn(&T) -> L,
    P: Fn(&L) -> PageRequest,
{
    let mut groups: Vec<(L, Vec<T>)> = Vec::new();
    for item in items.iter().filter(|item| filter(item)) {
        let label = rule(item);
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, bucket)) => bucket.push(item.clone()),
            None => groups.push((label, vec![item.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(label, bucket)| {
            let page = paginate(&bucket, page_for(&label));
            Partition { label, page }
        })
        .collect()
}

/// Per-list pagination state.
///
/// Changing the search text or the page size snaps back to the first page so
/// the view never points past the shrunken result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page_number: usize,
    items_per_page: usize,
    query: String,
}

impl ListState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            page_number: 1,
            items_per_page: items_per_page.max(1),
            query: String::new(),
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.items_per_page)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_page(&mut self, page_number: usize) {
        self.page_number = page_number.max(1);
    }

    /// Replace the search text; a changed filter resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page_number = 1;
        }
    }

    /// Change the page size; the current page resets to 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        let items_per_page = items_per_page.max(1);
        if items_per_page != self.items_per_page {
            self.items_per_page = items_per_page;
            self.page_number = 1;
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(PageRequest::default().items_per_page())
    }
}
