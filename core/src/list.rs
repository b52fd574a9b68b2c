//! The todo list view.
//!
//! # Design
//! The view stores the full collection and the active filter, never the
//! filtered subset, so the subset is always derived from the two and cannot
//! drift. Mounting issues exactly one collection read; changing the filter
//! only recomputes.

use std::fmt;

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::fetch::{Fetch, FetchState, PendingRequest, RequestTicket};
use crate::http::HttpResponse;
use crate::render::{FilterControl, ItemRow, ListBody, ListScreen};
use crate::types::{apply_filter, Filter, Todo, TodoId};

type SelectCallback = Box<dyn FnMut(TodoId)>;

/// Fetches the full collection once per mount and shows a filtered subset.
pub struct TodoListView {
    client: TodoClient,
    fetch: Fetch<Vec<Todo>>,
    filter: Filter,
    mounted: bool,
    on_select: Option<SelectCallback>,
}

impl fmt::Debug for TodoListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoListView")
            .field("client", &self.client)
            .field("fetch", &self.fetch)
            .field("filter", &self.filter)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl TodoListView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            fetch: Fetch::new(),
            filter: Filter::All,
            mounted: false,
            on_select: None,
        }
    }

    /// Register the callback invoked with an item's id when it is activated.
    pub fn on_select(&mut self, callback: impl FnMut(TodoId) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Start the collection read. Returns `None` if already mounted.
    pub fn mount(&mut self) -> Option<PendingRequest> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        let ticket = self.fetch.begin(None);
        let request = self.client.build_list_todos();
        info!(path = %request.path, seq = ticket.seq, "fetching todo list");
        Some(PendingRequest { ticket, request })
    }

    /// Drop the collection; the next `mount` fetches it again.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.filter = Filter::All;
        self.fetch.reset();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Hand the outcome of a mount request back to the view.
    ///
    /// Returns whether the outcome was applied; outcomes for stale tickets
    /// are dropped.
    pub fn resolve(&mut self, ticket: RequestTicket, outcome: Result<HttpResponse, ApiError>) -> bool {
        let parsed = outcome
            .and_then(|response| self.client.parse_list_todos(response))
            .map_err(|e| e.to_string());
        match &parsed {
            Ok(todos) => debug!(count = todos.len(), "todo list received"),
            Err(message) => warn!(%message, "todo list fetch failed"),
        }
        let applied = self.fetch.settle(ticket, parsed);
        if applied && self.fetch.state().data().is_some() {
            self.filter = Filter::All;
        }
        applied
    }

    pub fn state(&self) -> &FetchState<Vec<Todo>> {
        self.fetch.state()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Switch the active mode. Never touches the network.
    pub fn set_filter(&mut self, filter: Filter) {
        if filter != self.filter {
            debug!(from = %self.filter, to = %filter, "filter changed");
        }
        self.filter = filter;
    }

    /// Items matching the active filter; `None` until the collection loads.
    pub fn visible(&self) -> Option<Vec<&Todo>> {
        self.fetch.state().data().map(|todos| apply_filter(todos, self.filter))
    }

    /// Number of collection reads issued so far.
    pub fn requests_issued(&self) -> u64 {
        self.fetch.issued()
    }

    /// Activate the item `id`. Only ids currently rendered are accepted.
    pub fn activate(&mut self, id: TodoId) -> Option<TodoId> {
        let rendered = self
            .visible()
            .is_some_and(|todos| todos.iter().any(|todo| todo.id == id));
        if !rendered {
            debug!(id, "ignoring activation of an item that is not rendered");
            return None;
        }
        if let Some(callback) = self.on_select.as_mut() {
            callback(id);
        }
        Some(id)
    }

    pub fn render(&self) -> ListScreen {
        match self.fetch.state() {
            FetchState::Idle => ListScreen::Blank,
            FetchState::Loading => ListScreen::Loading,
            FetchState::Failure(message) => ListScreen::Error {
                message: message.clone(),
            },
            FetchState::Success(todos) => {
                let rows: Vec<ItemRow> = apply_filter(todos, self.filter)
                    .into_iter()
                    .map(ItemRow::from)
                    .collect();
                let body = if rows.is_empty() {
                    ListBody::Empty
                } else {
                    ListBody::Items(rows)
                };
                ListScreen::Loaded {
                    filters: FilterControl::all(self.filter),
                    body,
                }
            }
        }
    }
}
