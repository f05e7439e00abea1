//! CLI module for oddeven - command-line flags.

pub mod commands;

pub use commands::Cli;
