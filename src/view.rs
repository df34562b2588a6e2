//! A bubbletea-rs component that renders a paged list and drives its fetches.
//!
//! [`ListView`] wraps a [`ListStateController`] and a [`DataSource`]. Key
//! presses become controller transitions; every transition that changes the
//! query returns a [`Cmd`] which runs the fetch and comes back as a
//! [`FetchedMsg`]. Results of superseded fetches are dropped by the
//! controller, so typing quickly in the search box is safe.
//!
//! ## Keys
//!
//! - `←/h/pgup`, `→/l/pgdn`: previous / next page
//! - `g/home`, `G/end`: first / last page
//! - `m`: show more
//! - `/`: search, `enter` to keep the text, `esc` to clear it
//! - `r`: refresh
//! - one character per [`SortColumn`]: cycle that column's sort
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use bubbletea_paged_list::source::InMemorySource;
//! use bubbletea_paged_list::view::{ListView, SortColumn};
//!
//! # #[derive(Clone)] struct Row(u64);
//! # impl std::fmt::Display for Row {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "row {}", self.0) }
//! # }
//! # impl bubbletea_paged_list::sort::SortKey for Row {
//! #     fn sort_value(&self, _: &str) -> bubbletea_paged_list::sort::SortValue { self.0.into() }
//! # }
//! # impl bubbletea_paged_list::source::Searchable for Row {
//! #     fn matches_query(&self, term: &str) -> bool { self.0.to_string().contains(term) }
//! # }
//! let rows: Vec<Row> = (1..=30).map(Row).collect();
//! let mut view = ListView::new(Arc::new(InMemorySource::new(rows)))
//!     .with_title("Rows")
//!     .with_columns(vec![SortColumn::new("id", "Id", 'i')]);
//!
//! let fetch = view.init(); // run with the bubbletea program
//! assert!(view.controller().is_loading());
//! # drop(fetch);
//! ```

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use crate::config::ListConfig;
use crate::controller::{FetchOutcome, FetchTicket, ListStateController};
use crate::invalidation::InvalidationSubscription;
use crate::key::{self, Binding, KeyMap};
use crate::pagination::PageSlot;
use crate::sort::{SortDirection, SortKey, SortState};
use crate::source::{DataSource, FetchError, ResultSet};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Result of a fetch started by a [`ListView`].
#[derive(Debug)]
pub struct FetchedMsg<T> {
    view_id: u64,
    ticket: FetchTicket,
    result: Result<ResultSet<T>, FetchError>,
}

/// Sent when the watched resource was invalidated.
///
/// Carries the subscription back so the view can keep listening.
#[derive(Debug)]
pub struct InvalidatedMsg {
    view_id: u64,
    subscription: Option<InvalidationSubscription>,
}

/// A sortable column shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortColumn {
    /// Field name passed to the data source and to [`SortKey`].
    pub field: String,
    /// Header label.
    pub label: String,
    /// Key that cycles this column's sort.
    pub key: char,
}

impl SortColumn {
    /// Creates a column.
    pub fn new(field: impl Into<String>, label: impl Into<String>, key: char) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            key,
        }
    }
}

/// Key bindings for [`ListView`].
#[derive(Debug, Clone)]
pub struct ListViewKeyMap {
    /// Previous page.
    pub prev_page: Binding,
    /// Next page.
    pub next_page: Binding,
    /// First page.
    pub first_page: Binding,
    /// Last page.
    pub last_page: Binding,
    /// Reveal one more page of items on the current page.
    pub show_more: Binding,
    /// Start typing a search.
    pub search: Binding,
    /// Keep the typed search and leave search mode.
    pub accept_search: Binding,
    /// Clear the search and leave search mode.
    pub cancel_search: Binding,
    /// Fetch the current page again.
    pub refresh: Binding,
}

impl Default for ListViewKeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown])
                .with_help("→/l", "next page"),
            first_page: Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            last_page: Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
            show_more: Binding::new(vec![KeyCode::Char('m')]).with_help("m", "show more"),
            search: Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply search"),
            cancel_search: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear search"),
            refresh: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh"),
        }
    }
}

impl KeyMap for ListViewKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page, &self.show_more, &self.search]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.prev_page,
                &self.next_page,
                &self.first_page,
                &self.last_page,
            ],
            vec![&self.show_more, &self.refresh],
            vec![&self.search, &self.accept_search, &self.cancel_search],
        ]
    }
}

/// Styles used by [`ListView`].
#[derive(Debug, Clone)]
pub struct ListViewStyles {
    /// List title.
    pub title: Style,
    /// Search prompt and text.
    pub search: Style,
    /// Column header.
    pub header: Style,
    /// Header label of the sorted column.
    pub active_sort: Style,
    /// Item lines.
    pub item: Style,
    /// Loading, empty and hint lines.
    pub muted: Style,
    /// Error line.
    pub error: Style,
    /// Inactive page numbers.
    pub page: Style,
    /// Current page number.
    pub active_page: Style,
}

impl Default for ListViewStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            search: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            header: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            active_sort: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true),
            item: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            muted: Style::new().foreground(subdued.clone()),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#D9534F",
                Dark: "#FF5F87",
            }),
            page: Style::new().foreground(subdued),
            active_page: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
        }
    }
}

/// A paged, searchable, sortable list view.
pub struct ListView<T> {
    id: u64,
    title: String,
    width: usize,
    controller: ListStateController<T>,
    source: Arc<dyn DataSource<T>>,
    columns: Vec<SortColumn>,
    searching: bool,
    invalidations: Option<InvalidationSubscription>,
    /// Key bindings.
    pub keymap: ListViewKeyMap,
    /// Styles.
    pub styles: ListViewStyles,
}

impl<T> ListView<T>
where
    T: Display + SortKey + Clone + Send + Sync + 'static,
{
    /// Creates a view over `source` with the default configuration.
    pub fn new(source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            id: next_id(),
            title: String::new(),
            width: 80,
            controller: ListStateController::new(ListConfig::default()),
            source,
            columns: Vec::new(),
            searching: false,
            invalidations: None,
            keymap: ListViewKeyMap::default(),
            styles: ListViewStyles::default(),
        }
    }

    /// Replaces the controller configuration. Call before [`ListView::init`].
    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.controller = ListStateController::new(config);
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the render width in terminal cells; at least 1.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Sets the sortable columns.
    ///
    /// A column whose key is already taken by [`ListViewKeyMap`] (`m`, `r`,
    /// `g`, `h`, `l`, `/` and so on with the defaults) or by an earlier
    /// column is skipped with a warning. Set a custom keymap before calling
    /// this.
    pub fn with_columns(mut self, columns: Vec<SortColumn>) -> Self {
        let mut accepted: Vec<SortColumn> = Vec::with_capacity(columns.len());
        for column in columns {
            let code = KeyCode::Char(column.key);
            let bound = self
                .keymap
                .full_help()
                .into_iter()
                .flatten()
                .any(|binding| binding.keys().contains(&code));
            if bound || accepted.iter().any(|c| c.key == column.key) {
                warn!(key = %column.key, field = %column.field, "sort column key already bound");
                continue;
            }
            accepted.push(column);
        }
        self.columns = accepted;
        self
    }

    /// The sortable columns in use.
    pub fn columns(&self) -> &[SortColumn] {
        &self.columns
    }

    /// Refreshes the list whenever `subscription` reports an invalidation.
    pub fn with_invalidations(mut self, subscription: InvalidationSubscription) -> Self {
        self.invalidations = Some(subscription);
        self
    }

    /// The underlying controller.
    pub fn controller(&self) -> &ListStateController<T> {
        &self.controller
    }

    /// Returns true while search text is being typed.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Starts the first fetch.
    pub fn init(&mut self) -> Option<Cmd> {
        Some(self.fetch_cmd())
    }

    /// Starts a fetch for the controller's current state.
    pub fn fetch_cmd(&mut self) -> Cmd {
        let ticket = self.controller.begin_fetch();
        self.run_fetch(ticket)
    }

    fn run_fetch(&self, ticket: FetchTicket) -> Cmd {
        let source = Arc::clone(&self.source);
        let view_id = self.id;

        Box::pin(async move {
            let result = source.fetch_page(ticket.params()).await;
            Some(Box::new(FetchedMsg {
                view_id,
                ticket,
                result,
            }) as Msg)
        })
    }

    /// Waits for the next invalidation of the watched resource.
    ///
    /// Returns `None` when no subscription is parked on the view, either
    /// because none was given or because a wait is already running.
    pub fn watch_cmd(&mut self) -> Option<Cmd> {
        let mut subscription = self.invalidations.take()?;
        let view_id = self.id;

        Some(Box::pin(async move {
            let event = subscription.next().await;
            let subscription = event.map(|_| subscription);
            Some(Box::new(InvalidatedMsg {
                view_id,
                subscription,
            }) as Msg)
        }))
    }

    /// Abandons pending fetches and stops listening for invalidations.
    pub fn detach(&mut self) {
        self.controller.detach();
        self.invalidations = None;
    }

    /// Handles key presses, fetch results and invalidations.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<FetchedMsg<T>>() {
            Ok(fetched) => return self.on_fetched(*fetched),
            Err(msg) => msg,
        };
        let msg = match msg.downcast::<InvalidatedMsg>() {
            Ok(invalidated) => return self.on_invalidated(*invalidated),
            Err(msg) => msg,
        };

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return if self.searching {
                self.on_search_key(key_msg)
            } else {
                self.on_key(key_msg)
            };
        }
        None
    }

    fn on_fetched(&mut self, fetched: FetchedMsg<T>) -> Option<Cmd> {
        if fetched.view_id != self.id {
            return None;
        }
        match self.controller.complete_fetch(&fetched.ticket, fetched.result) {
            FetchOutcome::Detached => None,
            outcome if outcome.needs_refetch() => Some(self.fetch_cmd()),
            _ => self.watch_cmd(),
        }
    }

    fn on_invalidated(&mut self, invalidated: InvalidatedMsg) -> Option<Cmd> {
        if invalidated.view_id != self.id || self.controller.is_detached() {
            return None;
        }
        let Some(mut subscription) = invalidated.subscription else {
            debug!("invalidation channel closed");
            return None;
        };
        // Coalesce a burst of events into one refresh.
        subscription.take_pending();
        debug!(resource = subscription.resource(), "list invalidated");
        self.invalidations = Some(subscription);

        let ticket = self.controller.refresh();
        Some(self.run_fetch(ticket))
    }

    fn on_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let changed = if self.keymap.prev_page.matches(key_msg) {
            self.controller.prev_page()
        } else if self.keymap.next_page.matches(key_msg) {
            self.controller.next_page()
        } else if self.keymap.first_page.matches(key_msg) {
            self.controller.go_to_page(1)
        } else if self.keymap.last_page.matches(key_msg) {
            let last = self.controller.total_pages();
            self.controller.go_to_page(last)
        } else if self.keymap.show_more.matches(key_msg) {
            self.controller.show_more()
        } else if self.keymap.refresh.matches(key_msg) {
            true
        } else if self.keymap.search.matches(key_msg) {
            self.searching = true;
            false
        } else if let Some(field) = self.sort_field_for(key_msg) {
            self.controller.toggle_sort(&field)
        } else {
            false
        };

        changed.then(|| self.fetch_cmd())
    }

    fn on_search_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let mut text = self.controller.search_text().to_string();

        if self.keymap.accept_search.matches(key_msg) {
            self.searching = false;
            return None;
        }
        if self.keymap.cancel_search.matches(key_msg) {
            self.searching = false;
            text.clear();
        } else {
            let plain = key_msg.modifiers.difference(KeyModifiers::SHIFT).is_empty();
            match key_msg.key {
                KeyCode::Char(c) if plain => text.push(c),
                KeyCode::Backspace => {
                    text.pop();
                }
                _ => return None,
            }
        }

        self.controller
            .set_search_text(text)
            .then(|| self.fetch_cmd())
    }

    fn sort_field_for(&self, key_msg: &KeyMsg) -> Option<String> {
        let KeyCode::Char(c) = key_msg.key else {
            return None;
        };
        self.columns
            .iter()
            .find(|column| column.key == c)
            .map(|column| column.field.clone())
    }

    /// Renders the list.
    pub fn view(&self) -> String {
        let snapshot = self.controller.snapshot();
        let mut lines = Vec::new();

        lines.push(self.view_title(&snapshot.search_text));
        if !self.columns.is_empty() {
            lines.push(self.view_header(&snapshot.sort));
        }
        lines.extend(self.view_items(&snapshot.items));
        lines.push(self.view_footer(snapshot.can_show_more));

        lines.join("\n")
    }

    fn view_title(&self, search_text: &str) -> String {
        let mut line = if self.title.is_empty() {
            String::new()
        } else {
            self.styles.title.clone().render(&self.title)
        };

        if self.searching {
            let prompt = format!("/ {}█", search_text);
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&self.styles.search.clone().render(&prompt));
        } else if !search_text.trim().is_empty() {
            let label = format!("search: {}", search_text.trim());
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&self.styles.muted.clone().render(&label));
        }
        line
    }

    fn view_header(&self, sort: &SortState) -> String {
        let mut header = self
            .columns
            .iter()
            .map(|column| match sort.direction_for(&column.field) {
                Some(direction) => {
                    let arrow = match direction {
                        SortDirection::Desc => "↓",
                        SortDirection::Asc => "↑",
                    };
                    let text = format!("[{}] {} {}", column.key, column.label, arrow);
                    self.styles.active_sort.clone().render(&text)
                }
                None => {
                    let text = format!("[{}] {}", column.key, column.label);
                    self.styles.header.clone().render(&text)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");

        if sort.is_randomized() {
            header.push_str("  ");
            header.push_str(&self.styles.muted.clone().render("(shuffled)"));
        }
        header
    }

    fn view_items(&self, items: &[T]) -> Vec<String> {
        let c = &self.controller;
        let mut lines = Vec::new();

        if c.is_error() {
            let reason = c
                .last_error()
                .map(|err| err.to_string())
                .unwrap_or_default();
            let text = truncate(&format!("Failed to load: {}", reason), self.width);
            lines.push(self.styles.error.clone().render(&text));
        }

        if !c.has_result() {
            if c.is_loading() {
                lines.push(self.styles.muted.clone().render("Loading…"));
            }
            return lines;
        }

        if items.is_empty() {
            lines.push(self.styles.muted.clone().render("No results."));
        }
        for item in items {
            let text = truncate(&item.to_string(), self.width);
            lines.push(self.styles.item.clone().render(&text));
        }
        if c.is_loading() {
            lines.push(self.styles.muted.clone().render("Refreshing…"));
        }
        lines
    }

    fn view_footer(&self, can_show_more: bool) -> String {
        let current = self.controller.page();
        let pages = self
            .controller
            .page_slots()
            .into_iter()
            .map(|slot| match slot {
                PageSlot::Page(n) if n == current => {
                    self.styles.active_page.clone().render(&format!("[{}]", n))
                }
                PageSlot::Page(n) => self.styles.page.clone().render(&n.to_string()),
                PageSlot::Gap => self.styles.page.clone().render("…"),
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut footer = format!("‹ {} ›", pages);
        if can_show_more {
            footer.push_str("  ");
            footer.push_str(&self.styles.muted.clone().render("m: show more"));
        }
        let help = key::short_help_line(&self.keymap);
        if !help.is_empty() {
            footer.push('\n');
            footer.push_str(&self.styles.muted.clone().render(&help));
        }
        footer
    }
}

/// Cuts `s` to at most `width` terminal cells, ending in `…` when cut.
fn truncate(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }

    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
