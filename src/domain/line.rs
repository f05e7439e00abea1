//! Parity and output line types
//!
//! Each worker owns one parity and only emits values of that parity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the number line a worker is responsible for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Label printed in front of each value
    pub fn label(&self) -> &'static str {
        match self {
            Parity::Odd => "Odd",
            Parity::Even => "Even",
        }
    }

    /// Returns true if `n` belongs to this parity
    pub fn matches(&self, n: u64) -> bool {
        match self {
            Parity::Odd => n % 2 != 0,
            Parity::Even => n % 2 == 0,
        }
    }

    /// The parity that owns `n`
    pub fn of(n: u64) -> Self {
        if n % 2 == 0 { Parity::Even } else { Parity::Odd }
    }

    /// The first value this parity emits
    pub fn first(&self) -> u64 {
        match self {
            Parity::Odd => 1,
            Parity::Even => 2,
        }
    }

    /// All values in `1..=limit` belonging to this parity, ascending
    pub fn values(self, limit: u64) -> impl Iterator<Item = u64> {
        (self.first()..=limit).step_by(2)
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single emitted line: `<Label>: <n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub parity: Parity,
    pub value: u64,
}

impl Line {
    pub fn new(parity: Parity, value: u64) -> Self {
        Self { parity, value }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.parity.label(), self.value)
    }
}
