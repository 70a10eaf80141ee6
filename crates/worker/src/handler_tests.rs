// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::error::FetchError;
use idx_adapters::{CommandCall, FakeCommander};
use idx_core::JobId;
use serial_test::serial;
use std::time::Duration;

fn options() -> HandlerOptions {
    HandlerOptions {
        frontend_url: "https://frontend.example.com".to_string(),
        frontend_url_from_docker: "http://host.docker.internal:3080".to_string(),
        auth_token: "hunter2".to_string(),
    }
}

fn handler(fake: &FakeCommander) -> Handler<FakeCommander> {
    Handler::new(ActiveJobTracker::new(), fake.clone(), options())
}

fn job() -> IndexJob {
    IndexJob::new(42u64, "github.com/acme/widget", "abc123")
}

/// The working directory a recorded `git -C <dir> …` call ran against.
fn git_work_dir(call: &CommandCall) -> String {
    assert_eq!(call.program, "git");
    assert_eq!(call.args[0], "-C");
    call.args[1].clone()
}

#[tokio::test]
#[serial]
async fn successful_job_runs_git_then_container_and_cleans_up() {
    let fake = FakeCommander::new();
    let handler = handler(&fake);

    handler.handle(&job()).await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 4);
    let work_dir = git_work_dir(&calls[0]);

    let docker = &calls[3];
    assert_eq!(docker.program, "docker");
    assert_eq!(
        docker.args,
        vec![
            "run".to_string(),
            "--rm".to_string(),
            "-v".to_string(),
            format!("{work_dir}:/data"),
            "-w".to_string(),
            "/data".to_string(),
            "sourcegraph/lsif-go:latest".to_string(),
            "bash".to_string(),
            "-c".to_string(),
            "lsif-go && src -endpoint http://host.docker.internal:3080 lsif upload \
             -repo github.com/acme/widget -commit abc123"
                .to_string(),
        ]
    );

    // no working directory survives the invocation
    assert!(!std::path::Path::new(&work_dir).exists());
    assert!(handler.tracker().is_empty());
}

#[tokio::test]
#[serial]
async fn materialization_failure_never_launches_a_container() {
    let fake = FakeCommander::new();
    fake.fail_on("fetch");
    let handler = handler(&fake);

    let err = handler.handle(&job()).await.unwrap_err();

    assert!(matches!(
        err,
        HandleError::Fetch(FetchError::Git { .. })
    ));
    assert!(err.to_string().contains("fetch"), "got: {err}");

    let calls = fake.calls();
    assert!(calls.iter().all(|call| call.program != "docker"));
    assert!(!std::path::Path::new(&git_work_dir(&calls[0])).exists());
    assert!(handler.tracker().is_empty());
}

#[tokio::test]
#[serial]
async fn container_failure_is_wrapped_with_the_fixed_message() {
    let fake = FakeCommander::new();
    fake.fail_on("docker run");
    let handler = handler(&fake);

    let err = handler.handle(&job()).await.unwrap_err();

    assert!(matches!(err, HandleError::Index(_)), "got: {err}");
    assert!(
        err.to_string().starts_with("failed to index repository"),
        "got: {err}"
    );

    // cleanup still ran
    let work_dir = git_work_dir(&fake.calls()[0]);
    assert!(!std::path::Path::new(&work_dir).exists());
    assert!(handler.tracker().is_empty());
}

#[tokio::test]
#[serial]
async fn job_id_is_tracked_for_exactly_the_duration_of_the_call() {
    let fake = FakeCommander::new();
    fake.set_delay(Duration::from_millis(50));
    let handler = handler(&fake);
    let tracker = handler.tracker().clone();

    assert!(!tracker.contains(JobId(42)));

    let task = tokio::spawn({
        let handler = handler.clone();
        async move { handler.handle(&job()).await }
    });

    // visible while the (slowed) commands run
    let mut seen = false;
    for _ in 0..100 {
        if tracker.contains(JobId(42)) {
            seen = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(seen, "job id never appeared in the tracker");

    task.await.unwrap().unwrap();
    assert!(!tracker.contains(JobId(42)));
    assert!(tracker.is_empty());
}

#[tokio::test]
#[serial]
async fn concurrent_jobs_with_distinct_ids_all_settle() {
    let fake = FakeCommander::new();
    let handler = handler(&fake);

    let tasks: Vec<_> = (1..=8u64)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                let job = IndexJob::new(i, format!("github.com/acme/repo-{i}"), "abc123");
                handler.handle(&job).await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert!(handler.tracker().is_empty());
    // 8 jobs, 4 commands each
    assert_eq!(fake.calls().len(), 32);
}

#[test]
fn upload_half_only_follows_a_successful_analysis_half() {
    let script = index_and_upload_script(&options(), &job());
    let (analysis, upload) = script.split_once(" && ").unwrap();
    assert_eq!(analysis, "lsif-go");
    assert_eq!(
        upload,
        "src -endpoint http://host.docker.internal:3080 lsif upload \
         -repo github.com/acme/widget -commit abc123"
    );
}

#[test]
fn endpoint_is_substituted_verbatim() {
    let mut opts = options();
    opts.frontend_url_from_docker = "http://frontend:3090".to_string();
    let script = index_and_upload_script(&opts, &job());
    assert!(script.contains("-endpoint http://frontend:3090"), "got: {script}");
}

#[tokio::test]
#[serial]
async fn handler_is_usable_through_the_job_handler_boundary() {
    let fake = FakeCommander::new();
    let handler = handler(&fake);
    let boundary: &dyn JobHandler = &handler;

    boundary.handle(&job()).await.unwrap();
    assert_eq!(fake.calls().len(), 4);
}
