// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command execution adapters

mod system;

pub use system::SystemCommander;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CommandCall, FakeCommander};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Default deadline for git operations against the internal clone endpoint.
pub const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Default deadline for the containerized index-and-upload step.
/// Indexing a large repository can legitimately take a long time; this is
/// a safety net so a hung container does not pin a worker slot forever.
pub const INDEX_COMMAND_TIMEOUT: Duration = Duration::from_secs(3600);

/// Errors from running an external command.
///
/// Every variant carries the rendered program and arguments so operators
/// can tell which step failed and reproduce it manually.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}", .code.map_or_else(|| "signal".to_string(), |c| format!("status {c}")))]
    Exit { command: String, code: Option<i32> },
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
}

impl CommandError {
    /// The rendered command line the error refers to.
    pub fn command(&self) -> &str {
        match self {
            CommandError::Launch { command, .. }
            | CommandError::Exit { command, .. }
            | CommandError::TimedOut { command, .. } => command,
        }
    }
}

/// Render a program and its arguments for error messages and logs.
pub(crate) fn render_command(program: &str, args: &[String]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}

/// Adapter for launching external programs.
///
/// The only component that touches the OS process boundary directly;
/// everything above it depends on this contract alone, so tests substitute
/// a [`FakeCommander`].
#[async_trait]
pub trait Commander: Clone + Send + Sync + 'static {
    /// Launch `program` with `args`, wait for it to finish, and fail on
    /// non-zero exit. The child is killed if `timeout` elapses first.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<(), CommandError>;
}
