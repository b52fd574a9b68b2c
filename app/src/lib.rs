//! Hosting shell for the todo list and detail views.
//!
//! # Overview
//! The core views never perform I/O. This crate supplies the host side: a
//! `Transport` that executes their requests over HTTP, a `Shell` that owns
//! the selected todo and switches between the two views, and the
//! configuration for the `todo` binary.

pub mod config;
pub mod error;
pub mod shell;
pub mod transport;

pub use config::{Cli, Command, Config, ConfigError};
pub use error::AppError;
pub use shell::{Flow, Shell, View};
pub use transport::{Transport, UreqTransport};
