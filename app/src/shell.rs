//! The hosting shell: owns the selected id and toggles between the list and
//! detail views.
//!
//! # Design
//! The shell is the only place I/O happens. It executes each request a view
//! hands out through its `Transport` and immediately resolves the view with
//! the outcome. The selected id flows down into the detail view; selection
//! flows up from the list view through its `on_select` callback.

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;
use std::str::FromStr;

use todo_core::{Filter, PendingRequest, TodoClient, TodoDetailView, TodoId, TodoListView};
use todo_core::{DetailScreen, ListScreen};
use tracing::{debug, info};

use crate::transport::Transport;

pub const HELP: &str = "\
commands:
  all | open | completed    change the list filter
  filter <mode>             same as above
  select <id> | <id>        show a todo
  back                      return to the list
  reload                    fetch the current view again
  help                      show this text
  quit                      exit";

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Filter(Filter),
    Select(TodoId),
    Back,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` is not a todo id")]
    BadId(String),
    #[error(transparent)]
    BadFilter(#[from] todo_core::UnknownFilter),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let arg = words.next();
        match (head.to_ascii_lowercase().as_str(), arg) {
            ("all" | "open" | "completed", None) => Ok(Command::Filter(head.parse()?)),
            ("filter" | "f", Some(mode)) => Ok(Command::Filter(mode.parse()?)),
            ("select" | "show" | "s", Some(id)) => parse_id(id).map(Command::Select),
            ("back" | "b", None) => Ok(Command::Back),
            ("reload" | "r", None) => Ok(Command::Reload),
            ("help" | "h" | "?", None) => Ok(Command::Help),
            ("quit" | "q" | "exit", None) => Ok(Command::Quit),
            (_, None) if head.chars().all(|c| c.is_ascii_digit()) => parse_id(head).map(Command::Select),
            _ => Err(ParseCommandError::Unknown(line.trim().to_string())),
        }
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ParseCommandError> {
    match raw.parse::<TodoId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ParseCommandError::BadId(raw.to_string())),
    }
}

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail(TodoId),
}

pub struct Shell<T> {
    transport: T,
    list: TodoListView,
    detail: TodoDetailView,
    selected: Option<TodoId>,
    /// Written by the list view's selection callback, drained by `handle`.
    activated: Rc<Cell<Option<TodoId>>>,
    notice: Option<String>,
}

impl<T: Transport> Shell<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        let activated = Rc::new(Cell::new(None));
        let mut list = TodoListView::new(client.clone());
        let sink = Rc::clone(&activated);
        list.on_select(move |id| sink.set(Some(id)));
        Self {
            transport,
            list,
            detail: TodoDetailView::new(client),
            selected: None,
            activated,
            notice: None,
        }
    }

    /// Mount the list view.
    pub fn start(&mut self) {
        if let Some(pending) = self.list.mount() {
            self.run_list(pending);
        }
    }

    /// Show the detail view for `id`, fetching it if it is not already shown.
    pub fn open(&mut self, id: TodoId) {
        info!(id, "opening todo");
        self.selected = Some(id);
        if let Some(pending) = self.detail.set_id(id) {
            self.run_detail(pending);
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        self.notice = None;
        match command {
            Command::Filter(filter) => {
                self.close_detail();
                self.start();
                self.list.set_filter(filter);
            }
            Command::Select(id) => match self.view() {
                View::Detail(_) => self.open(id),
                View::List => {
                    self.list.activate(id);
                    match self.activated.take() {
                        Some(selected) => self.open(selected),
                        None => self.notice = Some(format!("todo {id} is not in the list")),
                    }
                }
            },
            Command::Back => {
                self.close_detail();
                self.start();
            }
            Command::Reload => match self.selected {
                Some(id) => {
                    let pending = self.detail.mount(id);
                    self.run_detail(pending);
                }
                None => {
                    let filter = self.list.filter();
                    self.list.unmount();
                    self.start();
                    self.list.set_filter(filter);
                }
            },
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Parse and handle one line of input; parse errors become a notice.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(ParseCommandError::Empty) => Flow::Continue,
            Err(e) => {
                self.notice = Some(e.to_string());
                Flow::Continue
            }
        }
    }

    pub fn view(&self) -> View {
        match self.selected {
            Some(id) => View::Detail(id),
            None => View::List,
        }
    }

    pub fn selected(&self) -> Option<TodoId> {
        self.selected
    }

    pub fn list(&self) -> &TodoListView {
        &self.list
    }

    pub fn detail(&self) -> &TodoDetailView {
        &self.detail
    }

    pub fn list_screen(&self) -> ListScreen {
        self.list.render()
    }

    pub fn detail_screen(&self) -> DetailScreen {
        self.detail.render()
    }

    /// True when the view on screen settled into an error.
    pub fn has_error(&self) -> bool {
        match self.view() {
            View::List => matches!(self.list.render(), ListScreen::Error { .. }),
            View::Detail(_) => matches!(self.detail.render(), DetailScreen::Error { .. }),
        }
    }

    pub fn render(&self) -> String {
        let mut out = match self.view() {
            View::List => self.list.render().to_string(),
            View::Detail(_) => self.detail.render().to_string(),
        };
        if let Some(notice) = &self.notice {
            let _ = writeln!(out, "{notice}");
        }
        out
    }

    fn close_detail(&mut self) {
        if self.selected.take().is_some() {
            debug!("returning to list");
            self.detail.unmount();
        }
    }

    fn run_list(&mut self, pending: PendingRequest) {
        let outcome = self.transport.execute(&pending.request);
        self.list.resolve(pending.ticket, outcome);
    }

    fn run_detail(&mut self, pending: PendingRequest) {
        let outcome = self.transport.execute(&pending.request);
        self.detail.resolve(pending.ticket, outcome);
    }
}
