//! Domain types shared by the list and detail views.
//!
//! # Design
//! `Todo` mirrors the remote service's schema but is defined independently
//! from the mock-server crate; integration tests catch schema drift. The
//! views never write a `Todo` back, so there are no create/update payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote service.
pub type TodoId = u64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub user_id: i64,
    pub title: String,
    pub completed: bool,
}

/// Which subset of the fetched collection the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Open,
    Completed,
}

impl Filter {
    /// Every mode, in the order the controls are rendered.
    pub const MODES: [Filter; 3] = [Filter::All, Filter::Open, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Open => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Open => "Open",
            Filter::Completed => "Completed",
        }
    }

    /// Stable identifier of the control that selects this mode.
    pub fn test_id(self) -> &'static str {
        match self {
            Filter::All => "filter-all",
            Filter::Open => "filter-open",
            Filter::Completed => "filter-completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no filter mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}` (expected all, open or completed)")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "open" => Ok(Filter::Open),
            "completed" => Ok(Filter::Completed),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// The items of `todos` matching `filter`, in their original order.
pub fn apply_filter(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}
