// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-job execution pipeline.

use crate::error::HandleError;
use crate::fetch::fetch_repository;
use crate::options::HandlerOptions;
use async_trait::async_trait;
use idx_adapters::{command::INDEX_COMMAND_TIMEOUT, Commander};
use idx_core::{ActiveJobTracker, IndexJob};
use std::path::Path;
use std::time::Instant;

/// Image the analysis tool ships in. Pinned per worker release.
pub const INDEXER_IMAGE: &str = "sourcegraph/lsif-go:latest";

/// Mount point of the working tree inside the indexing container.
const CONTAINER_WORKDIR: &str = "/data";

/// Orchestrates one indexing job: tracker registration, repository
/// materialization, the containerized index-and-upload step, and cleanup
/// of every temporary resource on every exit path.
///
/// Cheap to clone (tracker handle, commander, options); the surrounding
/// dequeue loop may call [`Handler::handle`] concurrently from many tasks,
/// one invocation per job.
#[derive(Clone)]
pub struct Handler<C: Commander> {
    tracker: ActiveJobTracker,
    commander: C,
    options: HandlerOptions,
}

impl<C: Commander> Handler<C> {
    pub fn new(tracker: ActiveJobTracker, commander: C, options: HandlerOptions) -> Self {
        Self {
            tracker,
            commander,
            options,
        }
    }

    /// The tracker this handler registers in-flight jobs with.
    pub fn tracker(&self) -> &ActiveJobTracker {
        &self.tracker
    }

    /// Clone the target commit into a temporary directory, run the indexer
    /// in a fresh container against it, and upload the result to the
    /// frontend API.
    pub async fn handle(&self, job: &IndexJob) -> Result<(), HandleError> {
        // Registered until this call returns, panics included.
        let _active = self.tracker.track(job.id);

        let start = Instant::now();
        tracing::info!(
            job_id = %job.id,
            repository = %job.repository_name,
            commit = %job.commit,
            "handling index job"
        );

        let work_dir = fetch_repository(
            &self.commander,
            &self.options,
            &job.repository_name,
            &job.commit,
        )
        .await?;

        let result = self.index_and_upload(work_dir.path(), job).await;

        // Best-effort; a cleanup failure must not mask the job's outcome.
        if let Err(err) = work_dir.close() {
            tracing::warn!(job_id = %job.id, error = %err, "failed to remove working directory");
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => tracing::info!(job_id = %job.id, elapsed_ms, "index job complete"),
            Err(err) => tracing::error!(job_id = %job.id, elapsed_ms, error = %err, "index job failed"),
        }
        result
    }

    async fn index_and_upload(&self, work_dir: &Path, job: &IndexJob) -> Result<(), HandleError> {
        let script = index_and_upload_script(&self.options, job);
        let args = docker_run_args(work_dir, &script);
        self.commander
            .run("docker", &args, INDEX_COMMAND_TIMEOUT)
            .await
            .map_err(HandleError::Index)
    }
}

/// Build the in-container script: run the indexer against the mounted
/// working tree, and only if that exits zero, upload the dump with the
/// repository and commit so the artifact is attributed correctly.
fn index_and_upload_script(options: &HandlerOptions, job: &IndexJob) -> String {
    let index = vec!["lsif-go".to_string()];
    let upload = vec![
        "src".to_string(),
        "-endpoint".to_string(),
        options.frontend_url_from_docker.clone(),
        "lsif".to_string(),
        "upload".to_string(),
        "-repo".to_string(),
        job.repository_name.clone(),
        "-commit".to_string(),
        job.commit.clone(),
    ];
    shell_and(&index, &upload)
}

/// Join two commands so the second runs if and only if the first exits
/// zero. The one place a shell string is built from structured arguments;
/// everything else stays an argument vector.
fn shell_and(first: &[String], second: &[String]) -> String {
    format!("{} && {}", first.join(" "), second.join(" "))
}

/// Arguments for the disposable indexing container: started fresh from the
/// pinned image, working tree bind-mounted as its working directory, and
/// removed automatically on completion.
fn docker_run_args(work_dir: &Path, script: &str) -> Vec<String> {
    vec![
        "run".to_string(),
        "--rm".to_string(),
        "-v".to_string(),
        format!("{}:{}", work_dir.display(), CONTAINER_WORKDIR),
        "-w".to_string(),
        CONTAINER_WORKDIR.to_string(),
        INDEXER_IMAGE.to_string(),
        "bash".to_string(),
        "-c".to_string(),
        script.to_string(),
    ]
}

/// Boundary with the dequeue loop that feeds jobs to this worker.
///
/// The framework invokes `handle` once per dequeued job, possibly from
/// many tasks at once; final disposition of the job (ack, retry,
/// dead-letter) stays on the framework side.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: &IndexJob) -> Result<(), HandleError>;
}

#[async_trait]
impl<C: Commander> JobHandler for Handler<C> {
    async fn handle(&self, job: &IndexJob) -> Result<(), HandleError> {
        Handler::handle(self, job).await
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
