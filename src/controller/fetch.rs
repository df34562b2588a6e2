//! Fetch lifecycle with latest-wins semantics.
//!
//! Fetches are split into two halves so that the controller never awaits
//! anything itself:
//!
//! 1. [`ListStateController::begin_fetch`] snapshots the fetch parameters into
//!    a numbered [`FetchTicket`] and marks the list as loading.
//! 2. [`ListStateController::complete_fetch`] hands the result back with its
//!    ticket. Only the newest ticket is applied; an older request that
//!    resolves late is discarded, as is everything after
//!    [`ListStateController::detach`].

use tracing::{debug, warn};

use super::ListStateController;
use crate::query::FetchParams;
use crate::source::{DataSource, FetchError, ResultSet};

/// Proof of a started fetch, carrying the parameters to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    params: FetchParams,
}

impl FetchTicket {
    /// Sequence number; higher is newer.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Parameters to pass to the data source.
    pub fn params(&self) -> &FetchParams {
        &self.params
    }
}

/// What [`ListStateController::complete_fetch`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the visible items.
    ///
    /// `page_clamped` is true when the new total no longer covers the current
    /// page; the page has been moved and another fetch is needed.
    Applied {
        /// The page moved because the total shrank.
        page_clamped: bool,
    },
    /// The fetch failed; the error flag is set and prior items are kept.
    Failed,
    /// A newer fetch was started after this one; nothing changed.
    Stale,
    /// The controller was detached; nothing changed.
    Detached,
}

impl FetchOutcome {
    /// Returns true when the caller should start another fetch.
    pub fn needs_refetch(&self) -> bool {
        matches!(self, FetchOutcome::Applied { page_clamped: true })
    }
}

impl<T> ListStateController<T> {
    /// Parameters for the data source, derived from the current state.
    ///
    /// Search text is trimmed and dropped when empty. Only a `Sorted` state
    /// is sent; a shuffle is applied on the client and never reaches the
    /// data source.
    pub fn derive_fetch_params(&self) -> FetchParams {
        FetchParams {
            query: self.query.normalized_search(),
            limit: self.query.effective_limit(),
            skip: self.query.skip(),
            sort_by: self.sort.field().map(str::to_string),
            order: self.sort.direction(),
        }
    }

    /// Starts a fetch for the current state.
    ///
    /// Any fetch started earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.in_flight = Some(self.issued);

        let ticket = FetchTicket {
            seq: self.issued,
            params: self.derive_fetch_params(),
        };
        debug!(seq = ticket.seq, params = ?ticket.params, "fetch started");
        ticket
    }

    /// Starts a fetch for the current state without any state change.
    ///
    /// Used when the data behind the list changed elsewhere.
    pub fn refresh(&mut self) -> FetchTicket {
        debug!("refresh requested");
        self.begin_fetch()
    }

    /// Returns true if `ticket` is the newest fetch and may still be applied.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        !self.detached && ticket.seq == self.issued
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Stale and detached results are dropped without any state change. A
    /// success replaces the items, clears the error flag and re-clamps the
    /// page to the new total. A failure sets the error flag and keeps the
    /// last good items.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ResultSet<T>, FetchError>,
    ) -> FetchOutcome {
        if self.detached {
            debug!(seq = ticket.seq, "discarding fetch result for detached list");
            return FetchOutcome::Detached;
        }
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                newest = self.issued,
                "discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }

        self.in_flight = None;
        match result {
            Ok(set) => {
                debug!(
                    seq = ticket.seq,
                    items = set.items.len(),
                    total = set.total,
                    "fetch applied"
                );
                self.items = set.items;
                self.has_result = true;
                self.error = None;
                let page_clamped = self.recompute_page_bounds(set.total);
                FetchOutcome::Applied { page_clamped }
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "fetch failed");
                self.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Fetches from `source` and applies the result in one step.
    ///
    /// When the new total moves the page, the corrected page is fetched too.
    pub async fn fetch_from<S>(&mut self, source: &S) -> FetchOutcome
    where
        S: DataSource<T> + ?Sized,
    {
        loop {
            let ticket = self.begin_fetch();
            let result = source.fetch_page(ticket.params()).await;
            let outcome = self.complete_fetch(&ticket, result);
            if !outcome.needs_refetch() {
                return outcome;
            }
        }
    }

    /// Abandons the controller: every pending and future result is ignored.
    ///
    /// Call when the owning view goes away.
    pub fn detach(&mut self) {
        debug!("list detached");
        self.detached = true;
        self.in_flight = None;
    }
}
