//! Capacity-zero rendezvous between two tasks
//!
//! A `send()` parks a one-shot ack in a single-slot queue and does not return
//! until a `receive()` has taken it and fired the ack. Neither side can run
//! ahead of the other by more than the pair currently in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, oneshot};

use crate::error::{OddEvenError, Result};

type Ack = oneshot::Sender<()>;

/// Completed operation counts, used to check 1:1 pairing after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandoffStats {
    pub sent: u64,
    pub received: u64,
}

#[derive(Debug, Default)]
struct State {
    closed: bool,
    waiting: usize,
}

struct Inner {
    tx: mpsc::Sender<Ack>,
    rx: tokio::sync::Mutex<mpsc::Receiver<Ack>>,
    state: Mutex<State>,
    sent: AtomicU64,
    received: AtomicU64,
}

/// Shared handle to a rendezvous channel. Clones refer to the same channel.
#[derive(Clone)]
pub struct Handoff {
    inner: Arc<Inner>,
}

impl Default for Handoff {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Handoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handoff")
            .field("closed", &self.is_closed())
            .field("waiting", &self.waiting())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Marks one task as parked on the channel for as long as it lives
struct Parked<'a> {
    state: &'a Mutex<State>,
}

impl<'a> Parked<'a> {
    fn enter(state: &'a Mutex<State>) -> Result<Self> {
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.closed {
            return Err(OddEvenError::Closed);
        }
        guard.waiting += 1;
        Ok(Self { state })
    }
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        guard.waiting -= 1;
    }
}

impl Handoff {
    /// Create a new open channel
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            inner: Arc::new(Inner {
                tx,
                rx: tokio::sync::Mutex::new(rx),
                state: Mutex::new(State::default()),
                sent: AtomicU64::new(0),
                received: AtomicU64::new(0),
            }),
        }
    }

    /// Hand the turn over. Blocks until a receiver has accepted it.
    pub async fn send(&self) -> Result<()> {
        let _parked = Parked::enter(&self.inner.state)?;
        let (ack_tx, ack_rx) = oneshot::channel();
        self.inner
            .tx
            .send(ack_tx)
            .await
            .map_err(|_| OddEvenError::Closed)?;
        ack_rx.await.map_err(|_| OddEvenError::Closed)?;
        self.inner.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Take the turn. Blocks until a sender offers one.
    ///
    /// Tokens left behind by cancelled senders are discarded; only a token
    /// whose ack reaches a live sender counts as received.
    pub async fn receive(&self) -> Result<()> {
        let _parked = Parked::enter(&self.inner.state)?;
        let mut rx = self.inner.rx.lock().await;
        loop {
            let ack = rx.recv().await.ok_or(OddEvenError::Closed)?;
            if ack.send(()).is_ok() {
                break;
            }
            log::debug!("Discarding handoff from a sender that went away");
        }
        drop(rx);
        self.inner.received.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Close the channel.
    ///
    /// Fails with `AlreadyClosed` on a second call and with `Busy` if any task
    /// is still parked in `send` or `receive`; the channel stays open in that case.
    pub async fn close(&self) -> Result<()> {
        {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.closed {
                return Err(OddEvenError::AlreadyClosed);
            }
            if state.waiting > 0 {
                return Err(OddEvenError::Busy(state.waiting));
            }
            state.closed = true;
        }
        // Nobody is parked and nobody can enter, so the receiver lock is free.
        self.inner.rx.lock().await.close();
        log::debug!("Handoff closed after {:?}", self.stats());
        Ok(())
    }

    /// Returns true once `close()` has succeeded
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner).closed
    }

    /// Number of tasks currently parked in `send` or `receive`
    pub fn waiting(&self) -> usize {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner).waiting
    }

    pub fn stats(&self) -> HandoffStats {
        HandoffStats {
            sent: self.inner.sent.load(Ordering::SeqCst),
            received: self.inner.received.load(Ordering::SeqCst),
        }
    }
}
