//! Page-range calculation for pager controls.
//!
//! [`compute`] maps `(total_count, page_size, current_page)` to the labels a
//! pager shows: page numbers, with an [`PageItem::Ellipsis`] where pages are
//! elided, plus whether previous/next buttons should be enabled.
//!
//! ```
//! use usekit::pagination::{compute, PageItem};
//!
//! let range = compute(100, 10, 5).unwrap();
//! assert_eq!(
//!     range.items,
//!     [PageItem::Page(4), PageItem::Page(5), PageItem::Page(6), PageItem::Ellipsis, PageItem::Page(10)]
//! );
//! assert!(range.has_previous_page && range.has_next_page);
//! ```

use std::fmt;
use thiserror::Error;
use tracing::warn;
use usekit_core::use_memo;

/// The first page.
const DEFAULT_START: u64 = 1;
/// Page counts up to this are shown without elision.
const MAX_PAGINATION_ITEMS: u64 = 5;
/// How close to either end the current page must be to pin the range there.
const NEIGHBORHOOD: u64 = 2;
/// Leading pages shown while near the start.
const MAX_SIBLINGS: u64 = 3;
/// Offset of the first page shown while near the end.
const PREVIEW_ITEM_LAST_PAGE: u64 = 4;

/// Label rendered for [`PageItem::Ellipsis`].
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid argument: {name} = {value} ({requirement})")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        requirement: &'static str,
    },
}

/// One entry of a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page(u64),
    /// One or more elided pages; render as a non-interactive label.
    Ellipsis,
}

impl PageItem {
    pub fn page(self) -> Option<u64> {
        match self {
            PageItem::Page(page) => Some(page),
            PageItem::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{page}"),
            PageItem::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

/// The computed pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRange {
    pub items: Vec<PageItem>,
    pub total_page_count: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PaginationRange {
    /// The concrete page numbers, in order.
    pub fn pages(&self) -> impl Iterator<Item = u64> + '_ {
        self.items.iter().filter_map(|item| item.page())
    }
}

fn pages(start: u64, end: u64) -> impl Iterator<Item = PageItem> {
    (start..=end).map(PageItem::Page)
}

/// Compute the pager for `total_count` items shown `page_size` at a time,
/// with `current_page` (1-based) selected.
///
/// `current_page` is not validated: values outside `1..=total_page_count`
/// fall through the same branches as valid ones.
pub fn compute(
    total_count: i64,
    page_size: i64,
    current_page: i64,
) -> Result<PaginationRange, PaginationError> {
    if total_count < 0 {
        warn!(total_count, "rejecting negative total count");
        return Err(PaginationError::InvalidArgument {
            name: "total_count",
            value: total_count,
            requirement: "must not be negative",
        });
    }
    if page_size <= 0 {
        warn!(page_size, "rejecting non-positive page size");
        return Err(PaginationError::InvalidArgument {
            name: "page_size",
            value: page_size,
            requirement: "must be at least 1",
        });
    }

    let total_page_count = (total_count as u64).div_ceil(page_size as u64);
    let last = i128::from(total_page_count);
    let current = i128::from(current_page);

    let items: Vec<PageItem> = if total_page_count <= MAX_PAGINATION_ITEMS {
        pages(DEFAULT_START, total_page_count).collect()
    } else if current <= i128::from(NEIGHBORHOOD) {
        pages(DEFAULT_START, MAX_SIBLINGS)
            .chain([PageItem::Ellipsis, PageItem::Page(total_page_count)])
            .collect()
    } else if current >= last - i128::from(DEFAULT_START)
        || last - i128::from(DEFAULT_START) - current <= i128::from(NEIGHBORHOOD)
    {
        // No leading ellipsis here, even though earlier pages are elided.
        pages(total_page_count - PREVIEW_ITEM_LAST_PAGE, total_page_count).collect()
    } else {
        // NEIGHBORHOOD < current < last - 3, so both neighbours are real pages.
        let current = current_page as u64;
        pages(current - DEFAULT_START, current + DEFAULT_START)
            .chain([PageItem::Ellipsis, PageItem::Page(total_page_count)])
            .collect()
    };

    Ok(PaginationRange {
        items,
        total_page_count,
        has_previous_page: current > i128::from(DEFAULT_START),
        has_next_page: current < last,
    })
}

/// [`compute`] as a hook, recomputed only when one of its inputs changes.
pub fn use_pagination(
    total_count: i64,
    page_size: i64,
    current_page: i64,
) -> Result<PaginationRange, PaginationError> {
    use_memo(
        || compute(total_count, page_size, current_page),
        (total_count, page_size, current_page),
    )
}
