//! Countdown barrier that releases a waiter once every task has reported in
//!
//! Workers hold a [`CompletionGuard`]; dropping it counts down exactly once,
//! so a task that returns early or panics still releases the waiter.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[derive(Debug)]
struct Inner {
    remaining: AtomicUsize,
    notify: Notify,
}

/// Blocks the orchestrating task until `n` completions have been recorded
#[derive(Debug, Clone)]
pub struct CompletionBarrier {
    inner: Arc<Inner>,
}

impl CompletionBarrier {
    /// Create a barrier expecting `count` completions
    pub fn new(count: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                remaining: AtomicUsize::new(count),
                notify: Notify::new(),
            }),
        }
    }

    /// Completions still outstanding
    pub fn remaining(&self) -> usize {
        self.inner.remaining.load(Ordering::SeqCst)
    }

    /// Record one completion
    pub fn done(&self) {
        let previous = self
            .inner
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        match previous {
            Ok(1) => {
                log::debug!("Completion barrier released");
                self.inner.notify.notify_waiters();
            }
            Ok(n) => log::trace!("Completion barrier: {} remaining", n - 1),
            Err(_) => log::warn!("Completion barrier counted down past zero"),
        }
    }

    /// Hand out a guard that calls `done()` when dropped
    pub fn guard(&self) -> CompletionGuard {
        CompletionGuard {
            barrier: self.clone(),
        }
    }

    /// Wait until every expected completion has been recorded
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking so a release between the check and the await is not lost
            notified.as_mut().enable();

            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Scoped completion: counts the barrier down once on drop
#[derive(Debug)]
#[must_use = "dropping the guard immediately counts the barrier down"]
pub struct CompletionGuard {
    barrier: CompletionBarrier,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.barrier.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Duration, sleep, timeout};

    #[tokio::test]
    async fn test_zero_count_is_released() {
        let barrier = CompletionBarrier::new(0);
        timeout(Duration::from_secs(1), barrier.wait()).await.unwrap();
    }

    #[test]
    fn test_done_counts_down() {
        let barrier = CompletionBarrier::new(2);
        barrier.done();
        assert_eq!(barrier.remaining(), 1);
        barrier.done();
        assert_eq!(barrier.remaining(), 0);
    }

    #[test]
    fn test_done_saturates_at_zero() {
        let barrier = CompletionBarrier::new(1);
        barrier.done();
        barrier.done();
        assert_eq!(barrier.remaining(), 0);
    }

    #[test]
    fn test_guard_counts_down_on_drop() {
        let barrier = CompletionBarrier::new(2);
        {
            let _guard = barrier.guard();
            assert_eq!(barrier.remaining(), 2);
        }
        assert_eq!(barrier.remaining(), 1);
    }

    #[tokio::test]
    async fn test_wait_blocks_until_all_done() {
        let barrier = CompletionBarrier::new(2);
        let first = barrier.guard();
        let second = barrier.guard();

        let waiter = barrier.clone();
        let handle = tokio::spawn(async move { waiter.wait().await });

        drop(first);
        sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        drop(second);
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_guard_fires_when_task_panics() {
        let barrier = CompletionBarrier::new(1);
        let guard = barrier.guard();

        fn blow_up() {
            panic!("worker blew up");
        }

        let handle = tokio::spawn(async move {
            let _guard = guard;
            blow_up();
        });
        assert!(handle.await.unwrap_err().is_panic());

        timeout(Duration::from_secs(1), barrier.wait()).await.unwrap();
    }
}
