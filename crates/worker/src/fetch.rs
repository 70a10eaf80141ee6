// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository materialization: a working tree for exactly one commit.
//!
//! A protocol-v2 fetch of the single target commit avoids pulling full
//! history, which matters at fleet scale.

use crate::clone_url::build_clone_url;
use crate::env;
use crate::error::FetchError;
use crate::options::HandlerOptions;
use idx_adapters::{command::GIT_COMMAND_TIMEOUT, Commander};
use tempfile::TempDir;

/// Allocate the per-job working directory.
///
/// When a scratch root is configured it is created first, missing parents
/// included; that creation failing is fatal to the job.
fn make_work_dir() -> Result<TempDir, FetchError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("index-");

    match env::scratch_root() {
        Some(root) => {
            std::fs::create_dir_all(&root).map_err(|source| FetchError::ScratchRoot {
                path: root.clone(),
                source,
            })?;
            builder.tempdir_in(&root).map_err(FetchError::TempDir)
        }
        None => builder.tempdir().map_err(FetchError::TempDir),
    }
}

/// Materialize `commit` of `repository_name` into a fresh working directory.
///
/// On success, ownership of the directory (including its eventual removal)
/// transfers to the caller. On failure, the partially-created directory is
/// removed before returning and the error names the failing git
/// sub-command.
pub async fn fetch_repository<C: Commander>(
    commander: &C,
    options: &HandlerOptions,
    repository_name: &str,
    commit: &str,
) -> Result<TempDir, FetchError> {
    let work_dir = make_work_dir()?;
    let clone_url = build_clone_url(&options.frontend_url, &options.auth_token, repository_name)?;

    let dir = work_dir.path().display().to_string();
    let commands: [&[&str]; 3] = [
        &["-C", &dir, "init"],
        &[
            "-C",
            &dir,
            "-c",
            "protocol.version=2",
            "fetch",
            clone_url.as_str(),
            commit,
        ],
        &["-C", &dir, "checkout", commit],
    ];

    for command in commands {
        let args: Vec<String> = command.iter().map(|arg| arg.to_string()).collect();
        if let Err(source) = commander.run("git", &args, GIT_COMMAND_TIMEOUT).await {
            // work_dir drops here, removing the partial checkout.
            return Err(FetchError::Git {
                args: args.join(" "),
                source,
            });
        }
    }

    Ok(work_dir)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
