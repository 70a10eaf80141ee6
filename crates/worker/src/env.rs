// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker crate.

use std::path::PathBuf;

/// Optional scratch root for per-job working directories.
///
/// Deployments set this so working trees land on a volume that docker is
/// allowed to bind-mount from; when unset, the system temp dir is used.
pub const ENV_TMPDIR: &str = "IDX_TMPDIR";

/// Scratch root override, if configured.
pub fn scratch_root() -> Option<PathBuf> {
    std::env::var(ENV_TMPDIR)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}
