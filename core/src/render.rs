//! Rendering surface for the list and detail views.
//!
//! # Design
//! Screens are plain data. Every element a user or a harness can look for
//! carries a stable, unique `test_id`, so automated tests locate controls
//! and items without depending on layout. `Display` gives the terminal
//! rendering used by the shell.

use std::fmt;

use crate::types::{Filter, Todo, TodoId};

pub const LOADING_TEST_ID: &str = "loading";
pub const ERROR_TEST_ID: &str = "error";
pub const EMPTY_TEST_ID: &str = "no-items";
pub const NOT_FOUND_TEST_ID: &str = "not-found";
pub const DETAIL_TEST_ID: &str = "todo-detail";

pub fn item_test_id(id: TodoId) -> String {
    format!("todo-item-{id}")
}

/// One filter control; exactly one per screen is `active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub filter: Filter,
    pub test_id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl FilterControl {
    pub fn all(active: Filter) -> Vec<FilterControl> {
        Filter::MODES
            .iter()
            .map(|&filter| FilterControl {
                filter,
                test_id: filter.test_id(),
                label: filter.label(),
                active: filter == active,
            })
            .collect()
    }
}

/// An activatable row in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: TodoId,
    pub test_id: String,
    pub title: String,
    pub completed: bool,
}

impl From<&Todo> for ItemRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            test_id: item_test_id(todo.id),
            title: todo.title.clone(),
            completed: todo.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Items(Vec<ItemRow>),
    /// The active filter matched nothing.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScreen {
    /// Not mounted yet.
    Blank,
    Loading,
    Error { message: String },
    Loaded {
        filters: Vec<FilterControl>,
        body: ListBody,
    },
}

impl ListScreen {
    /// Test ids of every element on screen, in render order.
    pub fn test_ids(&self) -> Vec<String> {
        match self {
            ListScreen::Blank => Vec::new(),
            ListScreen::Loading => vec![LOADING_TEST_ID.to_string()],
            ListScreen::Error { .. } => vec![ERROR_TEST_ID.to_string()],
            ListScreen::Loaded { filters, body } => {
                let mut ids: Vec<String> = filters.iter().map(|c| c.test_id.to_string()).collect();
                match body {
                    ListBody::Items(rows) => ids.extend(rows.iter().map(|r| r.test_id.clone())),
                    ListBody::Empty => ids.push(EMPTY_TEST_ID.to_string()),
                }
                ids
            }
        }
    }

    pub fn contains(&self, test_id: &str) -> bool {
        self.test_ids().iter().any(|id| id == test_id)
    }

    pub fn active_filter(&self) -> Option<Filter> {
        match self {
            ListScreen::Loaded { filters, .. } => filters.iter().find(|c| c.active).map(|c| c.filter),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[ItemRow] {
        match self {
            ListScreen::Loaded {
                body: ListBody::Items(rows),
                ..
            } => rows,
            _ => &[],
        }
    }
}

impl fmt::Display for ListScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListScreen::Blank => Ok(()),
            ListScreen::Loading => writeln!(f, "Loading todos..."),
            ListScreen::Error { message } => writeln!(f, "Error: {message}"),
            ListScreen::Loaded { filters, body } => {
                for control in filters {
                    if control.active {
                        write!(f, "[{}] ", control.label)?;
                    } else {
                        write!(f, " {}  ", control.label)?;
                    }
                }
                writeln!(f)?;
                match body {
                    ListBody::Empty => writeln!(f, "No items."),
                    ListBody::Items(rows) => {
                        for row in rows {
                            let mark = if row.completed { 'x' } else { ' ' };
                            writeln!(f, "[{mark}] {:>4}  {}", row.id, row.title)?;
                        }
                        Ok(())
                    }
                }
            }
        }
    }
}

/// One labelled field of the detail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub test_id: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailScreen {
    /// No identifier supplied yet.
    Blank,
    Loading,
    Error { message: String },
    NotFound { id: TodoId },
    Record(Todo),
}

impl DetailScreen {
    pub fn fields(&self) -> Vec<DetailField> {
        let DetailScreen::Record(todo) = self else {
            return Vec::new();
        };
        vec![
            DetailField {
                test_id: "todo-detail-id",
                label: "Id",
                value: todo.id.to_string(),
            },
            DetailField {
                test_id: "todo-detail-title",
                label: "Title",
                value: todo.title.clone(),
            },
            DetailField {
                test_id: "todo-detail-user",
                label: "User",
                value: todo.user_id.to_string(),
            },
            DetailField {
                test_id: "todo-detail-status",
                label: "Status",
                value: if todo.completed { "completed" } else { "open" }.to_string(),
            },
        ]
    }

    pub fn test_ids(&self) -> Vec<String> {
        match self {
            DetailScreen::Blank => Vec::new(),
            DetailScreen::Loading => vec![LOADING_TEST_ID.to_string()],
            DetailScreen::Error { .. } => vec![ERROR_TEST_ID.to_string()],
            DetailScreen::NotFound { .. } => vec![NOT_FOUND_TEST_ID.to_string()],
            DetailScreen::Record(_) => std::iter::once(DETAIL_TEST_ID.to_string())
                .chain(self.fields().into_iter().map(|field| field.test_id.to_string()))
                .collect(),
        }
    }

    pub fn record(&self) -> Option<&Todo> {
        match self {
            DetailScreen::Record(todo) => Some(todo),
            _ => None,
        }
    }
}

impl fmt::Display for DetailScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailScreen::Blank => Ok(()),
            DetailScreen::Loading => writeln!(f, "Loading todo..."),
            DetailScreen::Error { message } => writeln!(f, "Error: {message}"),
            DetailScreen::NotFound { id } => writeln!(f, "Todo {id} not found."),
            DetailScreen::Record(_) => {
                for field in self.fields() {
                    writeln!(f, "{:<7} {}", format!("{}:", field.label), field.value)?;
                }
                Ok(())
            }
        }
    }
}
