//! Main task: spawn both workers, wait on the barrier, join, close
//!
//! The handoff is closed only after both workers have finished, so close
//! never races a parked send or receive.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::task::{AbortHandle, JoinError, JoinHandle};

use crate::barrier::CompletionBarrier;
use crate::domain::{Mode, Parity};
use crate::emitter::Emitter;
use crate::error::{OddEvenError, Result};
use crate::handoff::{Handoff, HandoffStats};
use crate::turn::TurnToken;
use crate::worker::{Coordination, WorkerReport, spawn_even_emitter, spawn_odd_emitter, spawn_worker};

/// Number of worker tasks the barrier waits for
pub const WORKER_COUNT: usize = 2;

/// Parameters for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Iteration bound for both workers
    pub limit: u64,
    pub mode: Mode,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            limit: crate::config::DEFAULT_LIMIT,
            mode: Mode::default(),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub settings: RunSettings,
    pub odd: WorkerReport,
    pub even: WorkerReport,
    /// Handoff counts; zero in strict mode
    pub handoff: HandoffStats,
}

impl RunReport {
    /// Total lines printed by both workers
    pub fn lines_emitted(&self) -> usize {
        self.odd.emitted.len() + self.even.emitted.len()
    }
}

/// Run both workers to completion
pub async fn run(settings: RunSettings, emitter: Arc<dyn Emitter>) -> Result<RunReport> {
    info!("Starting {} run with limit {}", settings.mode, settings.limit);

    let barrier = CompletionBarrier::new(WORKER_COUNT);
    let handoff = Handoff::new();

    let (odd, even) = match settings.mode {
        Mode::Lockstep => (
            spawn_odd_emitter(handoff.clone(), emitter.clone(), settings.limit, barrier.guard()),
            spawn_even_emitter(handoff.clone(), emitter.clone(), settings.limit, barrier.guard()),
        ),
        Mode::Strict => {
            let token = TurnToken::new();
            (
                spawn_worker(
                    Parity::Odd,
                    Coordination::Turn(token.clone()),
                    emitter.clone(),
                    settings.limit,
                    barrier.guard(),
                ),
                spawn_worker(
                    Parity::Even,
                    Coordination::Turn(token),
                    emitter.clone(),
                    settings.limit,
                    barrier.guard(),
                ),
            )
        }
    };

    let aborts = [odd.abort_handle(), even.abort_handle()];
    let barrier_released = async {
        barrier.wait().await;
        debug!("Both workers reported completion");
        Ok::<(), OddEvenError>(())
    };

    // A failed worker leaves its partner parked on the handoff; stop it rather than hang.
    let (_, odd, even) = match tokio::try_join!(barrier_released, join(odd), join(even)) {
        Ok(joined) => joined,
        Err(err) => {
            warn!("Worker failed, aborting run: {}", err);
            aborts.iter().for_each(AbortHandle::abort);
            return Err(err);
        }
    };

    handoff.close().await?;
    let stats = handoff.stats();
    if settings.mode == Mode::Lockstep {
        check_pairing(stats, settings.limit)?;
    }

    info!("Run complete: {} lines, handoff {:?}", odd.emitted.len() + even.emitted.len(), stats);
    Ok(RunReport {
        settings,
        odd,
        even,
        handoff: stats,
    })
}

/// Every iteration on both sides must have completed exactly one pairing
fn check_pairing(stats: HandoffStats, limit: u64) -> Result<()> {
    if stats.sent != limit || stats.received != limit {
        return Err(OddEvenError::Mismatch {
            sent: stats.sent,
            received: stats.received,
            expected: limit,
        });
    }
    Ok(())
}

async fn join(handle: JoinHandle<Result<WorkerReport>>) -> Result<WorkerReport> {
    handle.await.map_err(describe_join_error)?
}

fn describe_join_error(err: JoinError) -> OddEvenError {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        OddEvenError::TaskPanicked(message)
    } else {
        OddEvenError::TaskPanicked(err.to_string())
    }
}
