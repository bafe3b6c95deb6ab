//! Compressed page-number display.
//!
//! Long page ranges render as first/last edges plus a sliding window around
//! the current page, with gap markers in between.

/// One slot in a rendered page strip.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    /// Rendered as an ellipsis.
    Gap,
}

/// Page counts up to this many render in full, with no gaps.
const VISIBLE_WINDOW: usize = 5;

/// The page strip for `current_page` of `total_pages`.
///
/// Near the start: pages 1–4, gap, last. Near the end: first, gap, the last
/// four. In the middle: first, gap, the three pages around the current one,
/// gap, last. Zero total pages yields an empty strip.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageToken> {
    let mut tokens = Vec::new();

    if total_pages <= VISIBLE_WINDOW {
        for page in 1..=total_pages {
            tokens.push(PageToken::Page(page));
        }
    } else if current_page <= 3 {
        for page in 1..=4 {
            tokens.push(PageToken::Page(page));
        }
        tokens.push(PageToken::Gap);
        tokens.push(PageToken::Page(total_pages));
    } else if current_page >= total_pages - 2 {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Gap);
        for page in (total_pages - 3)..=total_pages {
            tokens.push(PageToken::Page(page));
        }
    } else {
        tokens.push(PageToken::Page(1));
        tokens.push(PageToken::Gap);
        for page in (current_page - 1)..=(current_page + 1) {
            tokens.push(PageToken::Page(page));
        }
        tokens.push(PageToken::Gap);
        tokens.push(PageToken::Page(total_pages));
    }

    tokens
}
