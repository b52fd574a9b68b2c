//! The todo detail view.
//!
//! # Design
//! The view is driven by an externally supplied identifier. Every change of
//! identifier restarts the fetch, and each request is tagged with the id it
//! was issued for. A response is applied only if its ticket is the latest one
//! and its id still matches the current id, so the record on screen always
//! belongs to the last identifier requested, whatever order responses arrive
//! in.

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::fetch::{Fetch, FetchState, PendingRequest, RequestTicket};
use crate::http::HttpResponse;
use crate::render::DetailScreen;
use crate::types::{Todo, TodoId};

/// Shows a single todo fetched by id.
#[derive(Debug)]
pub struct TodoDetailView {
    client: TodoClient,
    current: Option<TodoId>,
    fetch: Fetch<Option<Todo>>,
}

impl TodoDetailView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            current: None,
            fetch: Fetch::new(),
        }
    }

    /// Fetch `id` unconditionally, replacing whatever is shown.
    pub fn mount(&mut self, id: TodoId) -> PendingRequest {
        self.current = Some(id);
        let ticket = self.fetch.begin(Some(id));
        let request = self.client.build_get_todo(id);
        info!(id, path = %request.path, seq = ticket.seq, "fetching todo");
        PendingRequest { ticket, request }
    }

    /// Point the view at `id`. Issues a request only when the id changed or
    /// nothing has been fetched for it.
    pub fn set_id(&mut self, id: TodoId) -> Option<PendingRequest> {
        if self.current == Some(id) && !matches!(self.fetch.state(), FetchState::Idle) {
            return None;
        }
        Some(self.mount(id))
    }

    /// Forget the current id and any in-flight request.
    pub fn unmount(&mut self) {
        self.current = None;
        self.fetch.reset();
    }

    pub fn current_id(&self) -> Option<TodoId> {
        self.current
    }

    /// Hand a response back. Returns whether it was applied.
    pub fn resolve(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        if ticket.target.is_none() || ticket.target != self.current {
            debug!(
                seq = ticket.seq,
                issued_for = ?ticket.target,
                current = ?self.current,
                "discarding response for a different todo"
            );
            return false;
        }
        let parsed = outcome
            .and_then(|response| self.client.parse_get_todo(response))
            .map_err(|e| e.to_string());
        if let Err(message) = &parsed {
            warn!(id = ?ticket.target, %message, "todo fetch failed");
        }
        self.fetch.settle(ticket, parsed)
    }

    pub fn state(&self) -> &FetchState<Option<Todo>> {
        self.fetch.state()
    }

    /// Number of requests issued over the view's lifetime.
    pub fn requests_issued(&self) -> u64 {
        self.fetch.issued()
    }

    pub fn render(&self) -> DetailScreen {
        match (self.fetch.state(), self.current) {
            (FetchState::Idle, _) | (_, None) => DetailScreen::Blank,
            (FetchState::Loading, _) => DetailScreen::Loading,
            (FetchState::Failure(message), _) => DetailScreen::Error {
                message: message.clone(),
            },
            (FetchState::Success(None), Some(id)) => DetailScreen::NotFound { id },
            (FetchState::Success(Some(todo)), _) => DetailScreen::Record(todo.clone()),
        }
    }
}
