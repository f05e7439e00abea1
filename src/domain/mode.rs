//! How the two workers coordinate

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordination protocol between the odd and even workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Odd sends, even receives, every iteration. Each group prints in order;
    /// the two groups may interleave in any order.
    #[default]
    Lockstep,
    /// A shared turn token; lines print exactly 1, 2, 3, ... in order.
    Strict,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Lockstep => f.write_str("lockstep"),
            Mode::Strict => f.write_str("strict"),
        }
    }
}
