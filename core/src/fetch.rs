//! Fetch lifecycle shared by the list and detail views.
//!
//! # Design
//! A fetch is `Idle -> Loading -> Success | Failure`. Each `begin` restarts
//! the machine from `Loading` and hands out a `RequestTicket`; only the most
//! recently issued ticket may settle it. A slow response to a superseded
//! request therefore can never overwrite a newer one, and there is no way to
//! be loading and failed at the same time.

use tracing::debug;

use crate::http::HttpRequest;
use crate::types::TodoId;

/// Where a fetch currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Failure(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Tags one issued request: its sequence number and the todo it was issued
/// for (`None` for the collection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub seq: u64,
    pub target: Option<TodoId>,
}

/// A request the host must execute, and the ticket to hand back with its
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: HttpRequest,
}

/// Owns a `FetchState` plus the bookkeeping that decides which outcome wins.
#[derive(Debug, Clone)]
pub struct Fetch<T> {
    state: FetchState<T>,
    issued: u64,
    outstanding: Option<RequestTicket>,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            issued: 0,
            outstanding: None,
        }
    }
}

impl<T> Fetch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Total number of requests started over the lifetime of this fetch.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn outstanding(&self) -> Option<RequestTicket> {
        self.outstanding
    }

    /// Restart from `Loading`, dropping any previous data or error.
    pub fn begin(&mut self, target: Option<TodoId>) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket {
            seq: self.issued,
            target,
        };
        if let Some(previous) = self.outstanding.replace(ticket) {
            debug!(superseded = previous.seq, seq = ticket.seq, "request superseded");
        }
        self.state = FetchState::Loading;
        ticket
    }

    /// Apply `outcome` if `ticket` is the one currently outstanding.
    ///
    /// Returns `false` and leaves the state untouched for stale or already
    /// settled tickets.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: Result<T, String>) -> bool {
        if self.outstanding != Some(ticket) {
            debug!(seq = ticket.seq, todo_id = ?ticket.target, "discarding stale response");
            return false;
        }
        self.outstanding = None;
        self.state = match outcome {
            Ok(data) => FetchState::Success(data),
            Err(message) => {
                debug!(seq = ticket.seq, %message, "request failed");
                FetchState::Failure(message)
            }
        };
        true
    }

    /// Back to `Idle`; an outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        self.outstanding = None;
        self.state = FetchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let fetch: Fetch<u32> = Fetch::new();
        assert_eq!(fetch.state(), &FetchState::Idle);
        assert_eq!(fetch.issued(), 0);
        assert!(fetch.outstanding().is_none());
    }

    #[test]
    fn begin_then_settle_success() {
        let mut fetch = Fetch::new();
        let ticket = fetch.begin(None);
        assert!(fetch.state().is_loading());
        assert!(fetch.settle(ticket, Ok(7)));
        assert_eq!(fetch.state().data(), Some(&7));
        assert!(fetch.outstanding().is_none());
    }

    #[test]
    fn settle_failure_keeps_message() {
        let mut fetch: Fetch<u32> = Fetch::new();
        let ticket = fetch.begin(None);
        assert!(fetch.settle(ticket, Err("boom".to_string())));
        assert_eq!(fetch.state().error(), Some("boom"));
        assert!(!fetch.state().is_loading());
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut fetch = Fetch::new();
        let first = fetch.begin(Some(1));
        let second = fetch.begin(Some(2));
        assert!(fetch.settle(second, Ok("two")));
        assert!(!fetch.settle(first, Ok("one")));
        assert_eq!(fetch.state(), &FetchState::Success("two"));
    }

    #[test]
    fn stale_response_arriving_first_does_not_settle() {
        let mut fetch = Fetch::new();
        let first = fetch.begin(Some(1));
        let second = fetch.begin(Some(2));
        assert!(!fetch.settle(first, Ok("one")));
        assert!(fetch.state().is_loading());
        assert!(fetch.settle(second, Ok("two")));
        assert_eq!(fetch.state().data(), Some(&"two"));
    }

    #[test]
    fn ticket_settles_only_once() {
        let mut fetch = Fetch::new();
        let ticket = fetch.begin(None);
        assert!(fetch.settle(ticket, Ok(1)));
        assert!(!fetch.settle(ticket, Err("late".to_string())));
        assert_eq!(fetch.state().data(), Some(&1));
    }

    #[test]
    fn begin_discards_previous_data() {
        let mut fetch = Fetch::new();
        let ticket = fetch.begin(Some(1));
        fetch.settle(ticket, Ok("one"));
        fetch.begin(Some(2));
        assert_eq!(fetch.state(), &FetchState::Loading);
    }

    #[test]
    fn reset_makes_outstanding_ticket_stale() {
        let mut fetch = Fetch::new();
        let ticket = fetch.begin(None);
        fetch.reset();
        assert!(!fetch.settle(ticket, Ok(1)));
        assert_eq!(fetch.state(), &FetchState::Idle);
        assert_eq!(fetch.issued(), 1);
    }
}
