//! List-state controller for paged, searchable, sortable list views.
//!
//! [`ListStateController`] is the one reusable primitive behind every list
//! view: it owns the search text, the current page, the page size, the
//! one-shot "show more" increment and the sort state, and it keeps them
//! consistent across every interaction.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `set_search_text` | new text, back to page 1, extra dropped |
//! | `go_to_page` / `prev_page` / `next_page` | clamped move, extra dropped |
//! | `show_more` | one-time widening of the current window |
//! | `toggle_sort` | `desc → asc → random` per field, back to page 1 |
//! | `recompute_page_bounds` | new total, page pulled back into range |
//! | `derive_fetch_params` | parameters for the data source |
//! | `apply_client_ordering` | sort or shuffle the current window |
//!
//! ## Fetching
//!
//! The controller does not talk to the network. A caller asks for a
//! [`FetchTicket`], runs the request however it likes and returns the result
//! with the ticket. Results of superseded tickets are dropped, so a slow
//! response to an old search can never overwrite a newer one.
//!
//! ```rust
//! use bubbletea_paged_list::controller::{FetchOutcome, ListStateController};
//! use bubbletea_paged_list::source::ResultSet;
//!
//! let mut list: ListStateController<u32> = ListStateController::default();
//!
//! let old = list.begin_fetch();
//! list.set_search_text("new");
//! let new = list.begin_fetch();
//!
//! let outcome = list.complete_fetch(&new, Ok(ResultSet { items: vec![1], total: 1 }));
//! assert_eq!(outcome, FetchOutcome::Applied { page_clamped: false });
//!
//! let outcome = list.complete_fetch(&old, Ok(ResultSet { items: vec![9, 9], total: 2 }));
//! assert_eq!(outcome, FetchOutcome::Stale);
//! assert_eq!(list.items(), &[1]);
//! ```

mod fetch;
mod model;
mod ordering;
mod transitions;

#[cfg(test)]
mod tests;

pub use fetch::{FetchOutcome, FetchTicket};
pub use model::ListStateController;
pub use ordering::{order_items, ListSnapshot};
