// src/listing/controller.rs

use crate::errors::ServerError;
use crate::service::{DataService, Page, QueryParams, ServiceError};
use std::sync::Mutex;
use tracing::{debug, warn};

/// A listing's query state: how it changes and how it is fetched.
pub trait ListingQuery: Clone {
    type Record: Clone;
    type Mutation;

    fn apply(&mut self, mutation: Self::Mutation);
    fn to_params(&self) -> QueryParams;
    fn fetch(
        service: &dyn DataService,
        params: &QueryParams,
    ) -> Result<Page<Self::Record>, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing has completed yet.
    Pending,
    Ready,
    Failed,
}

/// What the table currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<R> {
    pub rows: Vec<R>,
    pub pages: u32,
    pub total: Option<u64>,
    pub status: ViewStatus,
}

impl<R> ListingView<R> {
    fn pending() -> Self {
        Self {
            rows: Vec::new(),
            pages: 0,
            total: None,
            status: ViewStatus::Pending,
        }
    }

    fn failed() -> Self {
        Self {
            status: ViewStatus::Failed,
            ..Self::pending()
        }
    }

    fn ready(page: Page<R>) -> Self {
        Self {
            rows: page.rows,
            pages: page.pages,
            total: page.total,
            status: ViewStatus::Ready,
        }
    }
}

/// An outbound request, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    seq: u64,
    params: QueryParams,
}

impl FetchTicket {
    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A later ticket was issued; the outcome was dropped.
    Superseded,
}

/// Owns one listing's state and display. Every mutation issues a new ticket;
/// only the most recently issued ticket may update the display.
pub struct ListingController<Q: ListingQuery> {
    query: Q,
    issued: u64,
    /// Ticket the current view was produced by; 0 before any completion.
    shown: u64,
    view: ListingView<Q::Record>,
}

impl<Q: ListingQuery> ListingController<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            issued: 0,
            shown: 0,
            view: ListingView::pending(),
        }
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn view(&self) -> &ListingView<Q::Record> {
        &self.view
    }

    /// Whether the view was produced for the latest issued state. False
    /// while a newer fetch is still in flight.
    pub fn is_current(&self) -> bool {
        self.issued > 0 && self.shown == self.issued
    }

    /// Applies one mutation and issues the fetch for the resulting state.
    pub fn apply(&mut self, mutation: Q::Mutation) -> FetchTicket {
        self.query.apply(mutation);
        self.issue()
    }

    /// Issues a fetch for the current state without changing it.
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            params: self.query.to_params(),
        }
    }

    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Page<Q::Record>, ServiceError>,
    ) -> Completion {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "dropping superseded listing response"
            );
            return Completion::Superseded;
        }

        self.view = match outcome {
            Ok(page) => ListingView::ready(page),
            Err(e) => {
                warn!(seq = ticket.seq, params = ?ticket.params, error = %e, "listing fetch failed");
                ListingView::failed()
            }
        };
        self.shown = ticket.seq;
        Completion::Applied
    }

    pub fn snapshot(&self) -> Snapshot<Q> {
        Snapshot {
            query: self.query.clone(),
            view: self.view.clone(),
            stale: !self.is_current(),
        }
    }
}

/// A consistent copy of state and display taken under the lock.
pub struct Snapshot<Q: ListingQuery> {
    pub query: Q,
    pub view: ListingView<Q::Record>,
    /// The view does not yet reflect `query`; the page must load it itself.
    pub stale: bool,
}

/// Runs one interaction: mutate and tag under the lock, fetch without it,
/// then complete under the lock again. Returns `None` when a newer
/// interaction on the same listing was issued while this one was in flight.
pub fn run_fetch<Q: ListingQuery>(
    controller: &Mutex<ListingController<Q>>,
    service: &dyn DataService,
    mutation: Option<Q::Mutation>,
) -> Result<Option<Snapshot<Q>>, ServerError> {
    let ticket = {
        let mut ctrl = controller.lock().map_err(|_| ServerError::InternalError)?;
        match mutation {
            Some(m) => ctrl.apply(m),
            None => ctrl.issue(),
        }
    };

    let outcome = Q::fetch(service, ticket.params());

    let mut ctrl = controller.lock().map_err(|_| ServerError::InternalError)?;
    match ctrl.complete(&ticket, outcome) {
        Completion::Applied => Ok(Some(ctrl.snapshot())),
        Completion::Superseded => Ok(None),
    }
}
