//! Page arithmetic and page-window construction.
//!
//! Pages are 1-indexed throughout this crate. This module does not hold any
//! state; it only answers "how many pages are there" and "which page buttons
//! should be rendered" for a given position.
//!
//! Two window shapes are available:
//!
//! - [`build_sliding_window`]: a fixed number of contiguous page numbers that
//!   follows the current page. This is the canonical shape.
//! - [`build_gapped_window`]: the sliding window plus the first and last page,
//!   with [`PageSlot::Gap`] markers where pages are skipped.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_paged_list::pagination::{build_sliding_window, total_pages};
//!
//! let pages = total_pages(47, 10);
//! assert_eq!(pages, 5);
//! assert_eq!(build_sliding_window(5, pages, 3), vec![3, 4, 5]);
//! ```

/// Returns the number of pages needed to show `total` items, `base_size` at a time.
///
/// The result is always at least 1, even for an empty collection, so that a
/// list view always has a valid current page.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::pagination::total_pages;
///
/// assert_eq!(total_pages(0, 10), 1);
/// assert_eq!(total_pages(95, 10), 10);
/// assert_eq!(total_pages(100, 10), 10);
/// ```
pub fn total_pages(total: usize, base_size: usize) -> usize {
    if total == 0 {
        return 1;
    }
    total.div_ceil(base_size.max(1))
}

/// Builds the contiguous run of page numbers to render as page buttons.
///
/// The window keeps the current page roughly centered, always holds exactly
/// `min(window_size, total)` numbers and never leaves `[1, total]`.
///
/// # Arguments
///
/// * `current` - The current page (1-indexed)
/// * `total` - The total number of pages
/// * `window_size` - The maximum number of page buttons
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::pagination::build_sliding_window;
///
/// assert_eq!(build_sliding_window(5, 10, 3), vec![4, 5, 6]);
/// assert_eq!(build_sliding_window(1, 10, 3), vec![1, 2, 3]);
/// assert_eq!(build_sliding_window(10, 10, 3), vec![8, 9, 10]);
/// assert_eq!(build_sliding_window(2, 2, 3), vec![1, 2]);
/// assert!(build_sliding_window(1, 0, 3).is_empty());
/// ```
pub fn build_sliding_window(current: usize, total: usize, window_size: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let size = window_size.min(total);
    let mut start = current.saturating_sub(1).max(1);

    let max_start = total - size + 1;
    if start > max_start {
        start = max_start.max(1);
    }

    (start..start + size).collect()
}

/// One entry of a gapped page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A clickable page number.
    Page(usize),
    /// A run of skipped pages, usually rendered as "…".
    Gap,
}

/// Builds a page window that always includes the first and last page.
///
/// The middle of the window is the [`build_sliding_window`] result. Runs of
/// skipped pages between it and the edges collapse into a single
/// [`PageSlot::Gap`]; a run of exactly one page is shown as that page
/// instead, since a gap marker would take the same room.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::pagination::{build_gapped_window, PageSlot::{Gap, Page}};
///
/// assert_eq!(
///     build_gapped_window(5, 10, 3),
///     vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
/// );
/// assert_eq!(build_gapped_window(2, 2, 3), vec![Page(1), Page(2)]);
/// ```
pub fn build_gapped_window(current: usize, total: usize, window_size: usize) -> Vec<PageSlot> {
    let core = build_sliding_window(current, total, window_size);
    let (first, last) = match (core.first(), core.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut slots = Vec::with_capacity(core.len() + 4);
    if first > 1 {
        slots.push(PageSlot::Page(1));
        match first {
            2 => {}
            3 => slots.push(PageSlot::Page(2)),
            _ => slots.push(PageSlot::Gap),
        }
    }

    slots.extend(core.into_iter().map(PageSlot::Page));

    if last < total {
        match total - last {
            1 => {}
            2 => slots.push(PageSlot::Page(total - 1)),
            _ => slots.push(PageSlot::Gap),
        }
        slots.push(PageSlot::Page(total));
    }

    slots
}
