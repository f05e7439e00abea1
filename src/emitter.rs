//! Output sinks for emitted lines

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tokio::io::AsyncWriteExt;

use crate::domain::{Line, Parity};
use crate::error::Result;

/// Where workers write their lines
#[async_trait]
pub trait Emitter: Send + Sync {
    /// Write one line
    async fn emit(&self, line: Line) -> Result<()>;
}

/// Writes each line to standard output and flushes immediately
pub struct StdoutEmitter {
    stdout: tokio::sync::Mutex<tokio::io::Stdout>,
}

impl StdoutEmitter {
    pub fn new() -> Self {
        Self {
            stdout: tokio::sync::Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Emitter for StdoutEmitter {
    async fn emit(&self, line: Line) -> Result<()> {
        let text = format!("{}\n", line);
        let mut stdout = self.stdout.lock().await;
        stdout.write_all(text.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Records lines in emission order
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    lines: Mutex<Vec<Line>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Rendered text of every line, in order
    pub fn rendered(&self) -> Vec<String> {
        self.lines().iter().map(ToString::to_string).collect()
    }

    /// Values emitted for one parity, in emission order
    pub fn values(&self, parity: Parity) -> Vec<u64> {
        self.lines()
            .into_iter()
            .filter(|line| line.parity == parity)
            .map(|line| line.value)
            .collect()
    }
}

#[async_trait]
impl Emitter for MemoryEmitter {
    async fn emit(&self, line: Line) -> Result<()> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).push(line);
        Ok(())
    }
}
