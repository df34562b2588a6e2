//! User-driven state transitions.
//!
//! Every transition is synchronous and infallible. Each returns `true` when
//! it changed the query or sort state, which is the caller's cue to start a
//! new fetch. Requests that make no sense at the moment (a second "show
//! more", page 0, a page past the end) are clamped or ignored, never
//! rejected, so rapid interaction cannot put the list into a bad state.

use tracing::debug;

use super::ListStateController;
use crate::pagination;
use crate::shuffle::fresh_seed;

impl<T> ListStateController<T> {
    /// Replaces the search text and returns to page 1 without extra items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_paged_list::controller::ListStateController;
    ///
    /// let mut list: ListStateController<u32> = ListStateController::default();
    /// list.set_search_text("abc");
    /// assert_eq!(list.derive_fetch_params().query.as_deref(), Some("abc"));
    ///
    /// list.set_search_text("   ");
    /// assert_eq!(list.derive_fetch_params().query, None);
    /// ```
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed =
            text != self.query.search_text || self.query.page != 1 || self.query.extra != 0;

        self.query.search_text = text;
        self.query.page = 1;
        self.query.extra = 0;

        if changed {
            debug!(search = %self.query.search_text, "search text changed");
        }
        changed
    }

    /// Moves to page `n`, clamped to `[1, total_pages]`.
    ///
    /// Returns `false` without touching anything when the clamped page is
    /// the current page. Otherwise the "show more" increment is dropped so
    /// the new page starts from a clean `base_size` window.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        let target = n.clamp(1, self.total_pages);
        if target == self.query.page {
            return false;
        }

        debug!(from = self.query.page, to = target, "page changed");
        self.query.page = target;
        self.query.extra = 0;
        true
    }

    /// Moves one page back. Does nothing on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.go_to_page(self.query.page - 1)
    }

    /// Moves one page forward. Does nothing on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.go_to_page(self.query.page + 1)
    }

    /// Returns true on page 1.
    pub fn on_first_page(&self) -> bool {
        self.query.page <= 1
    }

    /// Returns true on the last page.
    pub fn on_last_page(&self) -> bool {
        self.query.page >= self.total_pages
    }

    /// Returns true if [`ListStateController::show_more`] would widen the window.
    pub fn can_show_more(&self) -> bool {
        self.query.extra == 0 && self.query.skip() + self.query.base_size < self.total
    }

    /// Widens the current window by up to one more page of items.
    ///
    /// Only one increment is allowed until the page, search or sort changes.
    /// The increment never reaches past the last item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_paged_list::controller::ListStateController;
    ///
    /// let mut list: ListStateController<u32> = ListStateController::default();
    /// list.recompute_page_bounds(25);
    ///
    /// assert!(list.show_more());
    /// assert_eq!(list.extra(), 10);
    /// assert!(!list.show_more()); // second call is a no-op
    /// assert_eq!(list.extra(), 10);
    /// ```
    pub fn show_more(&mut self) -> bool {
        if !self.can_show_more() {
            return false;
        }
        let revealed = self.query.skip() + self.query.base_size;
        self.query.extra = self.query.base_size.min(self.total - revealed);

        debug!(extra = self.query.extra, "show more");
        true
    }

    /// Advances the sort cycle for `field` and returns to page 1.
    ///
    /// `desc → asc → random`, restarting at `desc` for a different field.
    /// Always reports a change.
    pub fn toggle_sort(&mut self, field: &str) -> bool {
        self.toggle_sort_with(field, fresh_seed)
    }

    pub(super) fn toggle_sort_with(&mut self, field: &str, next_seed: impl FnOnce() -> u32) -> bool {
        self.sort = self.sort.toggled_with(field, next_seed);
        self.query.page = 1;
        self.query.extra = 0;

        debug!(field, sort = ?self.sort, "sort toggled");
        true
    }

    /// Records a new total and pulls the page back into range.
    ///
    /// Returns `true` if the page had to move, in which case the extra
    /// items are dropped as well and the caller should fetch again.
    pub fn recompute_page_bounds(&mut self, total: usize) -> bool {
        self.total = total;
        self.total_pages = pagination::total_pages(total, self.query.base_size);

        if self.query.page <= self.total_pages {
            return false;
        }

        debug!(
            from = self.query.page,
            to = self.total_pages,
            total,
            "page clamped to new total"
        );
        self.query.page = self.total_pages;
        self.query.extra = 0;
        true
    }
}
