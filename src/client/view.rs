//! Per-view request state.
//!
//! Every fetch is issued a [`Ticket`]. Only the response carrying the most
//! recently issued ticket may update the view; anything older is dropped, so
//! switching the year filter twice in quick succession never shows the first
//! year's rows.

use crate::models::filters::YearFilter;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct DashboardView<T> {
    generation: u64,
    state: ViewState<T>,
}

impl<T> Default for DashboardView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DashboardView<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: ViewState::Loading,
        }
    }

    /// Start a new request. Supersedes any request still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Loading;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a finished request. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn complete<E: std::fmt::Display>(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<T>, E>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(rows) if rows.is_empty() => ViewState::Empty,
            Ok(rows) => ViewState::Ready(rows),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        true
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Rows of a ready view; empty in every other state.
    pub fn rows(&self) -> &[T] {
        match &self.state {
            ViewState::Ready(rows) => rows,
            _ => &[],
        }
    }
}

/// Year dropdown: "All" first, then the available years newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSelector {
    options: Vec<YearFilter>,
    selected: YearFilter,
}

impl YearSelector {
    pub fn new(mut years: Vec<i32>) -> Self {
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        let options = std::iter::once(YearFilter::All)
            .chain(years.into_iter().map(YearFilter::Year))
            .collect();
        Self {
            options,
            selected: YearFilter::All,
        }
    }

    pub fn options(&self) -> &[YearFilter] {
        &self.options
    }

    pub fn selected(&self) -> YearFilter {
        self.selected
    }

    /// Select a listed option. Unknown years leave the selection unchanged.
    pub fn select(&mut self, year: YearFilter) -> bool {
        if self.options.contains(&year) {
            self.selected = year;
            true
        } else {
            false
        }
    }
}
