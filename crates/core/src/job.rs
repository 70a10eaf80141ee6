// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indexing job record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a queued indexing job.
///
/// Assigned by the external queue; the worker never generates these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One unit of indexing work: which repository, at which commit.
///
/// Created and owned by the queue; handed to the handler for the duration
/// of a single invocation and never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexJob {
    pub id: JobId,
    /// Repository name, e.g. `github.com/acme/widget`. Derives both the
    /// clone path and the internal clone URL.
    pub repository_name: String,
    /// Revision to materialize and index.
    pub commit: String,
}

impl IndexJob {
    pub fn new(
        id: impl Into<JobId>,
        repository_name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            repository_name: repository_name.into(),
            commit: commit.into(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
