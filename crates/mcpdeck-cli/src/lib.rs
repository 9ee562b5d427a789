//! `mcpdeck` command-line adapter.
//!
//! Parses arguments, composes the engine over the process and filesystem
//! adapters, and renders replies for the terminal or as JSON documents.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, build_config};
pub use commands::{Commands, SettingsCommand};
pub use error::CliError;
pub use parser::Cli;
