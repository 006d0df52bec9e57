//! Subcommand handlers.

pub mod capture;
pub mod completions;
pub mod config;
pub mod play;
pub mod read;
pub mod table;
