//! Shared turn token for strict global alternation
//!
//! Holds the next value that may be printed. A worker waits until the token
//! shows one of its own values, prints it, then passes the token on.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{OddEvenError, Result};

#[derive(Debug, Clone)]
pub struct TurnToken {
    next: Arc<watch::Sender<u64>>,
}

impl Default for TurnToken {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnToken {
    /// Token starting at 1
    pub fn new() -> Self {
        let (next, _) = watch::channel(1);
        Self { next: Arc::new(next) }
    }

    /// The value whose turn it currently is
    pub fn current(&self) -> u64 {
        *self.next.borrow()
    }

    /// Wait until it is `n`'s turn
    pub async fn wait_for(&self, n: u64) -> Result<()> {
        let mut rx = self.next.subscribe();
        rx.wait_for(|next| *next == n)
            .await
            .map_err(|_| OddEvenError::Closed)?;
        Ok(())
    }

    /// Give the turn to `n + 1`. Only the holder of `n` may pass.
    pub fn pass(&self, n: u64) -> Result<()> {
        let current = self.current();
        if current != n {
            return Err(OddEvenError::InvalidState(format!(
                "passed turn {} while turn {} is active",
                n, current
            )));
        }
        let following = n
            .checked_add(1)
            .ok_or_else(|| OddEvenError::InvalidState(format!("no turn after {}", n)))?;
        self.next.send_replace(following);
        Ok(())
    }
}
