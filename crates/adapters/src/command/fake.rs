// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake commander for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{render_command, CommandError, Commander};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Recorded command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandCall {
    /// Rendered command line, matching what error messages would show.
    pub fn rendered(&self) -> String {
        render_command(&self.program, &self.args)
    }
}

#[derive(Default)]
struct FakeCommanderState {
    calls: Vec<CommandCall>,
    /// Substrings that make a matching invocation fail with a non-zero exit.
    fail_on: Vec<String>,
    /// Artificial latency applied to every run, for concurrency tests.
    delay: Option<Duration>,
}

/// Fake commander that records invocations instead of spawning processes.
#[derive(Clone, Default)]
pub struct FakeCommander {
    inner: Arc<Mutex<FakeCommanderState>>,
}

impl FakeCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CommandCall> {
        self.inner.lock().calls.clone()
    }

    /// Fail any invocation whose rendered command line contains `needle`.
    pub fn fail_on(&self, needle: impl Into<String>) {
        self.inner.lock().fail_on.push(needle.into());
    }

    /// Apply an artificial delay to every subsequent run.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().delay = Some(delay);
    }
}

#[async_trait]
impl Commander for FakeCommander {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        _timeout: Duration,
    ) -> Result<(), CommandError> {
        let rendered = render_command(program, args);

        let (delay, failed) = {
            let mut inner = self.inner.lock();
            inner.calls.push(CommandCall {
                program: program.to_string(),
                args: args.to_vec(),
            });
            let failed = inner.fail_on.iter().any(|needle| rendered.contains(needle));
            (inner.delay, failed)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if failed {
            return Err(CommandError::Exit {
                command: rendered,
                code: Some(1),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
