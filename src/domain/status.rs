//! Per-task lifecycle: NotStarted -> Running -> Finished

use crate::error::{OddEvenError, Result};
use serde::{Deserialize, Serialize};

/// Status of a worker task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Spawned but not yet iterating
    #[default]
    NotStarted,
    /// Inside its loop
    Running,
    /// Loop complete
    Finished,
}

impl TaskStatus {
    /// Returns true if the task is done
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Finished)
    }

    /// Move to the next state. There are no retries, so Finished is final.
    pub fn advance(&mut self) -> Result<TaskStatus> {
        let next = match self {
            TaskStatus::NotStarted => TaskStatus::Running,
            TaskStatus::Running => TaskStatus::Finished,
            TaskStatus::Finished => {
                return Err(OddEvenError::InvalidState(
                    "task already finished".to_string(),
                ));
            }
        };
        *self = next;
        Ok(next)
    }
}
