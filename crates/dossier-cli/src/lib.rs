//! Dossier CLI library.
//!
//! Provides the core functionality for the `dossier` command-line interface:
//! configuration management, command execution, document reading, and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
