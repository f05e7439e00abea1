//! Error types for oddeven
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while running the alternation
#[derive(Debug, Error)]
pub enum OddEvenError {
    /// Send or receive on a handoff that has been closed
    #[error("Handoff closed")]
    Closed,

    /// Close called on a handoff that was already closed
    #[error("Handoff already closed")]
    AlreadyClosed,

    /// Close called while a task is still parked on the handoff
    #[error("Handoff busy: {0} task(s) still waiting")]
    Busy(usize),

    /// Invalid state transition
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A worker task panicked or was aborted
    #[error("Task panicked: {0}")]
    TaskPanicked(String),

    /// Send/receive counts diverged from the iteration bound
    #[error("Handoff mismatch: {sent} sent, {received} received, expected {expected}")]
    Mismatch { sent: u64, received: u64, expected: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for oddeven operations
pub type Result<T> = std::result::Result<T, OddEvenError>;
