//! Configuration system for oddeven.
//!
//! Values come from a YAML file (explicit path, project file, or user file)
//! and are then overridden by command-line flags.

use eyre::Result;
use std::path::PathBuf;

pub use self::global::Config;

mod global;

/// Iteration bound for each worker.
pub const DEFAULT_LIMIT: u64 = 10;

/// Tokio runtime worker threads.
pub const DEFAULT_WORKER_THREADS: usize = 2;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".oddeven.yml";

/// Load configuration from the standard search paths.
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<Config> {
    Config::load(explicit_path)
}
