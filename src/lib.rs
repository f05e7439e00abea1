//! oddeven - two tasks taking turns
//!
//! One worker prints odd numbers, the other even numbers. They coordinate
//! through a capacity-zero [`handoff::Handoff`] (or, in strict mode, a shared
//! [`turn::TurnToken`]) and the main task waits on a
//! [`barrier::CompletionBarrier`] before closing the handoff.

pub mod barrier;
pub mod config;
pub mod domain;
pub mod emitter;
pub mod error;
pub mod handoff;
pub mod orchestrator;
pub mod turn;
pub mod worker;

pub use error::{OddEvenError, Result};
