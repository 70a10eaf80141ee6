// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the worker pipeline

use idx_adapters::CommandError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from materializing a repository commit onto local disk.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create scratch root {}: {source}", .path.display())]
    ScratchRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to allocate working directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("invalid clone base URL {base}: {source}")]
    CloneUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported clone base URL: {base}")]
    CloneUrlUnsupported { base: String },
    #[error("failed `git {args}`: {source}")]
    Git {
        args: String,
        #[source]
        source: CommandError,
    },
}

/// Errors from handling one indexing job.
///
/// The two variants split where operators need the distinction: did the
/// clone/checkout fail, or did the analysis/upload inside the container?
#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to index repository: {0}")]
    Index(#[source] CommandError),
}
