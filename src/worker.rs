//! Odd and even worker tasks
//!
//! In lockstep mode the odd worker sends on the handoff every iteration and
//! the even worker receives every iteration; each then prints the counter if
//! it has the right parity. In strict mode both workers walk their own values
//! over a shared [`TurnToken`].

use std::sync::Arc;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::barrier::CompletionGuard;
use crate::domain::{Line, Parity, TaskStatus};
use crate::emitter::Emitter;
use crate::error::Result;
use crate::handoff::Handoff;
use crate::turn::TurnToken;

/// What a worker coordinates through
#[derive(Debug, Clone)]
pub enum Coordination {
    Handoff(Handoff),
    Turn(TurnToken),
}

/// Summary of one worker's run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub parity: Parity,
    /// Loop passes completed
    pub iterations: u64,
    /// Values printed, in order
    pub emitted: Vec<u64>,
    pub status: TaskStatus,
}

impl WorkerReport {
    fn new(parity: Parity) -> Self {
        Self {
            parity,
            iterations: 0,
            emitted: Vec::new(),
            status: TaskStatus::NotStarted,
        }
    }

    async fn emit(&mut self, emitter: &dyn Emitter, value: u64) -> Result<()> {
        emitter.emit(Line::new(self.parity, value)).await?;
        self.emitted.push(value);
        Ok(())
    }
}

/// Spawn the odd worker on a handoff: send, then print if odd
pub fn spawn_odd_emitter(
    handoff: Handoff,
    emitter: Arc<dyn Emitter>,
    limit: u64,
    guard: CompletionGuard,
) -> JoinHandle<Result<WorkerReport>> {
    spawn_worker(Parity::Odd, Coordination::Handoff(handoff), emitter, limit, guard)
}

/// Spawn the even worker on a handoff: receive, then print if even
pub fn spawn_even_emitter(
    handoff: Handoff,
    emitter: Arc<dyn Emitter>,
    limit: u64,
    guard: CompletionGuard,
) -> JoinHandle<Result<WorkerReport>> {
    spawn_worker(Parity::Even, Coordination::Handoff(handoff), emitter, limit, guard)
}

/// Spawn a worker for `parity`. The guard is released when the task ends,
/// whether it finishes, fails or panics.
pub fn spawn_worker(
    parity: Parity,
    coordination: Coordination,
    emitter: Arc<dyn Emitter>,
    limit: u64,
    guard: CompletionGuard,
) -> JoinHandle<Result<WorkerReport>> {
    tokio::spawn(async move {
        let _guard = guard;
        let mut report = WorkerReport::new(parity);
        report.status.advance()?;
        debug!("{} worker running, limit {}", parity, limit);

        match coordination {
            Coordination::Handoff(handoff) => {
                run_lockstep(&mut report, &handoff, emitter.as_ref(), limit).await?
            }
            Coordination::Turn(token) => run_strict(&mut report, &token, emitter.as_ref(), limit).await?,
        }

        report.status.advance()?;
        info!(
            "{} worker finished after {} iterations, emitted {:?}",
            parity, report.iterations, report.emitted
        );
        Ok(report)
    })
}

async fn run_lockstep(report: &mut WorkerReport, handoff: &Handoff, emitter: &dyn Emitter, limit: u64) -> Result<()> {
    for i in 1..=limit {
        match report.parity {
            Parity::Odd => handoff.send().await?,
            Parity::Even => handoff.receive().await?,
        }
        report.iterations += 1;

        if report.parity.matches(i) {
            report.emit(emitter, i).await?;
        }
    }
    Ok(())
}

async fn run_strict(report: &mut WorkerReport, token: &TurnToken, emitter: &dyn Emitter, limit: u64) -> Result<()> {
    for n in report.parity.values(limit) {
        token.wait_for(n).await?;
        report.iterations += 1;
        report.emit(emitter, n).await?;
        token.pass(n)?;
    }
    Ok(())
}
