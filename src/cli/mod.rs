//! CLI module
//!
//! Command-line interface over the case management client.
//!
//! # Commands
//!
//! - `list` - List cases, optionally every page
//! - `get` - Show one case
//! - `comment` - Comment on a case
//! - `resolve` / `unresolve` / `accept` - Move a case through resolution
//! - `download` - Save an attachment to disk

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
