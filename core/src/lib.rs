//! List and detail views over a read-only todo service.
//!
//! # Overview
//! The views are deterministic state machines. A view hands out a
//! `PendingRequest` (an `HttpRequest` plus a `RequestTicket`); the host
//! executes the round-trip and returns the outcome with that ticket. The
//! core never touches the network, which keeps every transition testable.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces requests, `parse_*`
//!   consumes responses.
//! - `Fetch<T>` models `Idle | Loading | Success | Failure` and drops
//!   outcomes of superseded requests.
//! - `TodoListView` stores the full collection plus a `Filter` and derives
//!   the visible subset on demand.
//! - `TodoDetailView` refetches whenever its identifier changes; the last
//!   identifier requested always wins.
//! - `render` turns view state into screens whose elements carry stable
//!   test ids.

pub mod client;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod http;
pub mod list;
pub mod render;
pub mod types;

pub use client::TodoClient;
pub use detail::TodoDetailView;
pub use error::ApiError;
pub use fetch::{Fetch, FetchState, PendingRequest, RequestTicket};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::TodoListView;
pub use render::{DetailScreen, ListBody, ListScreen};
pub use types::{apply_filter, Filter, Todo, TodoId, UnknownFilter};
