//! The controller struct, construction and read accessors.

use crate::config::ListConfig;
use crate::pagination::{self, PageSlot};
use crate::query::ListQuery;
use crate::sort::SortState;
use crate::source::FetchError;

/// Pagination, search, sort and show-more state for one list view.
///
/// The controller owns everything a paged list needs to decide *what* to
/// fetch and *how* to order what came back, and nothing about how it is
/// drawn. Every list view creates its own instance; instances share nothing.
///
/// # State
///
/// - **Query**: search text, page (1-indexed), base page size and the extra
///   items revealed by "show more"
/// - **Sort**: [`SortState::Unsorted`], `Sorted` or `Randomized`
/// - **Result**: the last successfully fetched window and its total
/// - **Fetch status**: loading and error flags plus the newest ticket number
///
/// # Invariants
///
/// - `page` is always within `[1, total_pages]` once a total is known
/// - `skip` is always `(page - 1) * base_size`
/// - `extra` is either 0 or the one-shot increment set by `show_more`
/// - only the newest fetch ticket can change the result
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::config::ListConfig;
/// use bubbletea_paged_list::controller::ListStateController;
///
/// let mut list: ListStateController<String> =
///     ListStateController::new(ListConfig::new().with_base_size(10));
/// list.recompute_page_bounds(47);
///
/// assert!(list.go_to_page(5));
/// assert_eq!(list.page(), 5);
/// assert_eq!(list.skip(), 40);
/// assert!(!list.show_more()); // 40 + 10 >= 47, nothing left to reveal
/// ```
#[derive(Debug, Clone)]
pub struct ListStateController<T> {
    pub(super) config: ListConfig,
    pub(super) query: ListQuery,
    pub(super) sort: SortState,

    // Last applied result
    pub(super) items: Vec<T>,
    pub(super) total: usize,
    pub(super) total_pages: usize,
    pub(super) has_result: bool,

    // Fetch bookkeeping
    pub(super) issued: u64,
    pub(super) in_flight: Option<u64>,
    pub(super) error: Option<FetchError>,
    pub(super) detached: bool,
}

impl<T> Default for ListStateController<T> {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl<T> ListStateController<T> {
    /// Creates a controller on page 1, unsorted, with no search text.
    ///
    /// A zero `base_size` or `window_size` in `config` is raised to 1.
    pub fn new(config: ListConfig) -> Self {
        let config = ListConfig {
            base_size: config.base_size.max(1),
            window_size: config.window_size.max(1),
            ..config
        };
        Self {
            query: ListQuery::new(config.base_size),
            config,
            sort: SortState::Unsorted,
            items: Vec::new(),
            total: 0,
            total_pages: 1,
            has_result: false,
            issued: 0,
            in_flight: None,
            error: None,
            detached: false,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// The current query position.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// The active sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Raw search text as last set.
    pub fn search_text(&self) -> &str {
        &self.query.search_text
    }

    /// Current page, starting at 1.
    pub fn page(&self) -> usize {
        self.query.page
    }

    /// Items per page.
    pub fn base_size(&self) -> usize {
        self.query.base_size
    }

    /// Items revealed by "show more" on top of `base_size`.
    pub fn extra(&self) -> usize {
        self.query.extra
    }

    /// Offset of the current window.
    pub fn skip(&self) -> usize {
        self.query.skip()
    }

    /// Size of the current window.
    pub fn effective_limit(&self) -> usize {
        self.query.effective_limit()
    }

    /// Last known total number of matching items.
    ///
    /// Kept while a new fetch is in flight so paging controls do not jump.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages for the last known total; at least 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Page numbers to render, from the sliding window.
    pub fn page_window(&self) -> Vec<usize> {
        pagination::build_sliding_window(self.query.page, self.total_pages, self.config.window_size)
    }

    /// Page buttons to render, honoring [`ListConfig::gapped_window`].
    pub fn page_slots(&self) -> Vec<PageSlot> {
        if self.config.gapped_window {
            pagination::build_gapped_window(
                self.query.page,
                self.total_pages,
                self.config.window_size,
            )
        } else {
            self.page_window().into_iter().map(PageSlot::Page).collect()
        }
    }

    /// Items of the last applied result, in source order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns true once any fetch has succeeded.
    pub fn has_result(&self) -> bool {
        self.has_result
    }

    /// Returns true while the newest fetch has not completed.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true if the newest completed fetch failed.
    ///
    /// Stays set until a later fetch succeeds.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error of the newest completed fetch, if it failed.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Returns true after [`ListStateController::detach`].
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}
