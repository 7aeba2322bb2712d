//! Debounced filter controller for a resource table
//!
//! One controller instance holds the draft filter state for one table,
//! debounces free-text edits, and turns state changes into committed
//! [`ListQuery`] navigations. It is a pure state machine with an explicit
//! clock: callers pass `Instant`s in and drive the quiet-period timer via
//! [`TableController::poll`], so every transition is testable without a
//! rendering framework or a runtime.
//!
//! Per field the lifecycle is Idle -> Editing -> (quiet period elapses)
//! -> Committing -> Idle. Any edit during Editing or Committing re-arms
//! the single timer and supersedes the pending commit: last write wins,
//! nothing is queued.

use fleetdeck_core::{ListQuery, ListResult};
use std::time::{Duration, Instant};

/// Quiet period a field edit must survive before it commits.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// A committed navigation: the query to fetch, tagged with a monotonically
/// increasing sequence number for the stale-response guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Fetch sequence number; higher supersedes lower.
    pub seq: u64,
    /// The query to encode and navigate to.
    pub query: ListQuery,
}

/// State-transition messages accepted by the controller.
#[derive(Debug, Clone)]
pub enum Msg<T> {
    /// Free-text search edit (debounced).
    SetSearch(String),
    /// Field-filter edit (debounced).
    SetFilter {
        /// Filter key, e.g. `companyId`.
        key: String,
        /// Raw value; empty clears the filter.
        value: String,
    },
    /// Date-range edit (debounced); empty strings clear the bounds.
    SetDateRange {
        /// Inclusive start date.
        from: String,
        /// Inclusive end date.
        to: String,
    },
    /// Page-size selection (debounced; commits back to page 1).
    SetPageSize(u32),
    /// Explicit apply: bypasses the debounce, commits immediately.
    Apply,
    /// Explicit reset: clears all filter fields, then commits immediately.
    Reset,
    /// Direct page navigation; never debounced.
    PageChange(u32),
    /// A fetch finished; stale sequence numbers are discarded.
    FetchCompleted {
        /// Sequence number the fetch was issued with.
        seq: u64,
        /// The fetched page.
        result: ListResult<T>,
    },
    /// A mutation succeeded; re-fetch with the given query (the current
    /// one, or page-decremented after a page-emptying delete).
    MutationSuccess(ListQuery),
}

/// Debounced filter state machine for one table instance.
#[derive(Debug)]
pub struct TableController<T> {
    /// Fields as currently edited; `page` is carried but ignored until commit.
    draft: ListQuery,
    /// The last committed query.
    applied: ListQuery,
    /// Newest accepted fetch result.
    result: Option<ListResult<T>>,
    /// Pending quiet-period deadline, when a debounced edit is in flight.
    deadline: Option<Instant>,
    /// Next sequence number to assign.
    next_seq: u64,
}

impl<T> TableController<T> {
    /// Controller starting from the query the page was rendered with.
    #[must_use]
    pub fn new(initial: ListQuery) -> Self {
        Self {
            draft: initial.clone(),
            applied: initial,
            result: None,
            deadline: None,
            next_seq: 1,
        }
    }

    /// The last committed query.
    #[must_use]
    pub const fn applied(&self) -> &ListQuery {
        &self.applied
    }

    /// The newest accepted fetch result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&ListResult<T>> {
        self.result.as_ref()
    }

    /// The pending debounce deadline, for driving a timer.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Apply one message, returning a commit when one fires immediately.
    ///
    /// Debounced edits never commit here; they arm the quiet-period timer
    /// and the commit surfaces from a later [`Self::poll`].
    pub fn handle(&mut self, msg: Msg<T>, now: Instant) -> Option<Commit> {
        match msg {
            Msg::SetSearch(value) => {
                self.draft = self.draft.clone().with_search(&value);
                self.arm(now);
                None
            }
            Msg::SetFilter { key, value } => {
                self.draft = self.draft.clone().with_filter(&key, &value);
                self.arm(now);
                None
            }
            Msg::SetDateRange { from, to } => {
                self.draft = self.draft.clone().with_date_range(&from, &to);
                self.arm(now);
                None
            }
            Msg::SetPageSize(size) => {
                self.draft = self.draft.clone().with_page_size(size);
                self.arm(now);
                None
            }
            Msg::Apply => {
                self.deadline = None;
                Some(self.issue(self.draft.on_first_page()))
            }
            Msg::Reset => {
                self.deadline = None;
                let cleared = ListQuery::new().with_page_size(self.draft.page_size);
                Some(self.issue(cleared))
            }
            Msg::PageChange(page) => self.page_change(page),
            Msg::FetchCompleted { seq, result } => {
                // Last fetch wins: a slow response issued before the newest
                // commit must not overwrite fresher data.
                if seq >= self.newest_issued() {
                    self.result = Some(result);
                }
                None
            }
            Msg::MutationSuccess(refresh) => Some(self.issue(refresh)),
        }
    }

    /// Fire the pending debounced commit once its deadline has passed.
    ///
    /// Commits only when the drafted fields actually diverge from the
    /// last-applied query; re-typing the applied value round-trips nothing.
    pub fn poll(&mut self, now: Instant) -> Option<Commit> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        if self.diverges() {
            // Changing filters always returns to page 1: a stale page
            // number against a new filtered total could silently render
            // an out-of-range, empty page.
            Some(self.issue(self.draft.on_first_page()))
        } else {
            None
        }
    }

    fn page_change(&mut self, page: u32) -> Option<Commit> {
        let result = self.result.as_ref()?;
        if page < 1 || page > result.total_pages || page == self.applied.page {
            return None;
        }
        Some(self.issue(self.applied.clone().with_page(page)))
    }

    fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + DEBOUNCE_QUIET_PERIOD);
    }

    /// Whether the drafted fields differ from the applied query, page aside.
    fn diverges(&self) -> bool {
        self.draft.search != self.applied.search
            || self.draft.filters != self.applied.filters
            || self.draft.date_from != self.applied.date_from
            || self.draft.date_to != self.applied.date_to
            || self.draft.page_size != self.applied.page_size
    }

    fn issue(&mut self, query: ListQuery) -> Commit {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.applied = query.clone();
        self.draft = query.clone();
        Commit { seq, query }
    }

    /// The most recently issued fetch sequence number; completions older
    /// than this are stale.
    #[must_use]
    pub const fn newest_issued(&self) -> u64 {
        self.next_seq - 1
    }
}
