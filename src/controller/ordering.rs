//! Client-side ordering of the current window and the renderer snapshot.

use super::ListStateController;
use crate::sort::{sort_by_field, SortKey, SortState};
use crate::shuffle::shuffle_with_seed;

/// Orders `items` for display according to `sort`.
///
/// - `Randomized`: seeded shuffle, identical on every call with the same seed
/// - `Sorted`: stable sort by the field in the given direction
/// - `Unsorted`: unchanged
///
/// Only the given items are reordered; this is applied to the window the
/// data source returned, not to the whole collection.
pub fn order_items<T: SortKey + Clone>(sort: &SortState, items: &[T]) -> Vec<T> {
    match sort {
        SortState::Unsorted => items.to_vec(),
        SortState::Randomized { seed } => shuffle_with_seed(items, *seed),
        SortState::Sorted { field, direction } => {
            let mut sorted = items.to_vec();
            sort_by_field(&mut sorted, field, *direction);
            sorted
        }
    }
}

/// Everything a renderer reads from a controller, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    /// Raw search text.
    pub search_text: String,
    /// Current page, starting at 1.
    pub page: usize,
    /// Number of pages; at least 1.
    pub total_pages: usize,
    /// Page numbers to render as buttons.
    pub page_window: Vec<usize>,
    /// Items of the current window after client ordering.
    pub items: Vec<T>,
    /// The newest fetch is still running.
    pub is_loading: bool,
    /// The newest completed fetch failed.
    pub is_error: bool,
    /// "Show more" would reveal additional items.
    pub can_show_more: bool,
    /// Active sort state.
    pub sort: SortState,
}

impl<T: SortKey + Clone> ListStateController<T> {
    /// Orders `items` with the controller's sort state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_paged_list::controller::ListStateController;
    /// use bubbletea_paged_list::sort::{SortKey, SortValue};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Views(u64);
    ///
    /// impl SortKey for Views {
    ///     fn sort_value(&self, _field: &str) -> SortValue {
    ///         self.0.into()
    ///     }
    /// }
    ///
    /// let mut list: ListStateController<Views> = ListStateController::default();
    /// list.toggle_sort("views"); // desc
    /// let ordered = list.apply_client_ordering(&[Views(1), Views(3), Views(2)]);
    /// assert_eq!(ordered, vec![Views(3), Views(2), Views(1)]);
    /// ```
    pub fn apply_client_ordering(&self, items: &[T]) -> Vec<T> {
        order_items(&self.sort, items)
    }

    /// The last applied items after client ordering.
    pub fn effective_items(&self) -> Vec<T> {
        self.apply_client_ordering(&self.items)
    }

    /// Captures the renderer-facing state.
    pub fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            search_text: self.query.search_text.clone(),
            page: self.query.page,
            total_pages: self.total_pages,
            page_window: self.page_window(),
            items: self.effective_items(),
            is_loading: self.is_loading(),
            is_error: self.is_error(),
            can_show_more: self.can_show_more(),
            sort: self.sort.clone(),
        }
    }
}
