//! Domain types for oddeven
//!
//! - Parity / Line: who emits what, and how it is printed
//! - Mode: how the two workers take turns
//! - TaskStatus: the per-worker lifecycle

pub mod line;
pub mod mode;
pub mod status;

pub use line::{Line, Parity};
pub use mode::Mode;
pub use status::TaskStatus;
