// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-flight job bookkeeping.
//!
//! The tracker records which job ids this worker process is currently
//! handling. It exists for observability (status endpoints, debugging a
//! wedged worker), not for correctness of single-job processing.

use crate::job::JobId;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Concurrency-safe set of job ids currently being processed.
///
/// Cloning yields a handle to the same underlying set, so the handler and
/// any monitoring reader can share one tracker. Constructed explicitly and
/// passed in at handler construction time, never a process-global.
#[derive(Clone, Default)]
pub struct ActiveJobTracker {
    inner: Arc<Mutex<HashSet<JobId>>>,
}

impl ActiveJobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` is now in progress. Total; never blocks indefinitely.
    pub fn add_id(&self, id: JobId) {
        self.inner.lock().insert(id);
    }

    /// Record that `id` is no longer in progress. Total; removing an id
    /// that was never added is a no-op.
    pub fn remove_id(&self, id: JobId) {
        self.inner.lock().remove(&id);
    }

    /// Whether `id` is currently in progress.
    pub fn contains(&self, id: JobId) -> bool {
        self.inner.lock().contains(&id)
    }

    /// Sorted snapshot of in-flight job ids, for monitoring output.
    pub fn ids(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = self.inner.lock().iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Register `id` and return a guard that removes it when dropped.
    ///
    /// The guard runs on every exit path of the enclosing scope, panics
    /// included, so the set never leaks an entry for a job whose
    /// processing has ended.
    pub fn track(&self, id: JobId) -> ActiveJobGuard {
        self.add_id(id);
        ActiveJobGuard {
            tracker: self.clone(),
            id,
        }
    }
}

/// Scoped registration of one in-flight job id.
#[must_use = "dropping the guard immediately would unregister the job"]
pub struct ActiveJobGuard {
    tracker: ActiveJobTracker,
    id: JobId,
}

impl ActiveJobGuard {
    pub fn id(&self) -> JobId {
        self.id
    }
}

impl Drop for ActiveJobGuard {
    fn drop(&mut self) {
        self.tracker.remove_id(self.id);
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
