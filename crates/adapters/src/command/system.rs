// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real subprocess commander

use super::{render_command, CommandError, Commander};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Commander backed by real OS processes.
///
/// The child inherits stdout/stderr so operator-visible output (git
/// progress, indexer logs) lands in the worker's own streams. Stdin is
/// closed; nothing the worker runs is interactive.
#[derive(Clone, Default)]
pub struct SystemCommander;

impl SystemCommander {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Commander for SystemCommander {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<(), CommandError> {
        let rendered = render_command(program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| CommandError::Launch {
            command: rendered.clone(),
            source,
        })?;

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(source)) => {
                return Err(CommandError::Launch {
                    command: rendered,
                    source,
                })
            }
            Err(_elapsed) => {
                // Kill and reap so the child does not outlive its deadline.
                if let Err(err) = child.kill().await {
                    tracing::warn!(command = %rendered, error = %err, "failed to kill timed-out child");
                }
                return Err(CommandError::TimedOut {
                    command: rendered,
                    timeout,
                });
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                command: rendered,
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
