#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-paged-list/")]

//! # bubbletea-paged-list
//!
//! Paged, searchable, sortable list state for terminal applications built
//! with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! Every list screen needs the same handful of rules: which page is shown,
//! how many items to ask for, what happens to the page when the search
//! changes, how a column cycles through its sort orders, and what to do when
//! an old request answers after a new one. This crate keeps those rules in
//! one place, the [`ListStateController`], and renders it with a ready-made
//! bubbletea component, [`ListView`].
//!
//! ## Features
//!
//! - **Pagination** with a sliding page window and optional first/last gaps
//! - **Show more**: widen the current page once by up to one more page
//! - **Sorting**: `desc → asc → random` per column, random order from a
//!   stored seed so re-renders keep the same order
//! - **Search** that always restarts at page 1
//! - **Latest-wins fetching**: results of superseded requests are dropped
//! - **Invalidation**: refresh views when data changes elsewhere
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`controller`] | List state, transitions and fetch lifecycle |
//! | [`source`] | `DataSource` trait, `ResultSet`, `InMemorySource` |
//! | [`query`] | `ListQuery` and the `FetchParams` sent to a source |
//! | [`sort`] | Sort state machine and field comparison |
//! | [`shuffle`] | Seeded Mulberry32 shuffle |
//! | [`pagination`] | Page counts and page windows |
//! | [`stats`] | Engagement counters from loosely shaped JSON |
//! | [`invalidation`] | Publish/subscribe change notifications |
//! | [`view`] | bubbletea-rs list component |
//! | [`key`] | Key bindings |
//! | [`config`] | `ListConfig` |
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_paged_list::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! struct User {
//!     name: String,
//!     age: u64,
//! }
//!
//! impl SortKey for User {
//!     fn sort_value(&self, field: &str) -> SortValue {
//!         match field {
//!             "name" => self.name.as_str().into(),
//!             "age" => self.age.into(),
//!             _ => SortValue::Missing,
//!         }
//!     }
//! }
//!
//! impl Searchable for User {
//!     fn matches_query(&self, term: &str) -> bool {
//!         self.name.to_lowercase().contains(term)
//!     }
//! }
//!
//! let users: Vec<User> = (0..23)
//!     .map(|i| User { name: format!("user{}", i), age: 20 + i })
//!     .collect();
//! let source = InMemorySource::new(users);
//!
//! let mut list: ListStateController<User> = ListStateController::new(ListConfig::default());
//! list.toggle_sort("age");
//!
//! let ticket = list.begin_fetch();
//! let page = source.query(ticket.params());
//! list.complete_fetch(&ticket, Ok(page));
//!
//! assert_eq!(list.total_pages(), 3);
//! assert_eq!(list.items()[0].age, 42);
//! assert!(list.can_show_more());
//! ```
//!
//! ## Logging
//!
//! State transitions and discarded fetch results are reported as `tracing`
//! `debug` events and failed fetches as `warn` events. The crate installs no
//! subscriber.

pub mod config;
pub mod controller;
pub mod invalidation;
pub mod key;
pub mod pagination;
pub mod query;
pub mod shuffle;
pub mod sort;
pub mod source;
pub mod stats;
pub mod view;

pub use config::{ConfigError, ListConfig};
pub use controller::{FetchOutcome, FetchTicket, ListSnapshot, ListStateController};
pub use invalidation::{ChangeKind, Invalidation, InvalidationBus, InvalidationSubscription};
pub use key::{Binding, Help as KeyHelp, KeyMap};
pub use pagination::{build_gapped_window, build_sliding_window, total_pages, PageSlot};
pub use query::{FetchParams, ListQuery};
pub use shuffle::{shuffle_with_seed, Mulberry32};
pub use sort::{SortDirection, SortKey, SortState, SortValue};
pub use source::{DataSource, FetchError, InMemorySource, ResultSet, Searchable};
pub use view::{ListView, ListViewKeyMap, ListViewStyles, SortColumn};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_paged_list::prelude::*;
///
/// let list: ListStateController<u32> = ListStateController::new(ListConfig::default());
/// assert_eq!(list.page(), 1);
/// ```
pub mod prelude {
    pub use crate::config::ListConfig;
    pub use crate::controller::{FetchOutcome, FetchTicket, ListStateController};
    pub use crate::invalidation::{Invalidation, InvalidationBus};
    pub use crate::sort::{SortDirection, SortKey, SortState, SortValue};
    pub use crate::source::{DataSource, FetchError, InMemorySource, ResultSet, Searchable};
    pub use crate::view::{ListView, SortColumn};
}
