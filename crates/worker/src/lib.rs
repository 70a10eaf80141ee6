// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! idx-worker: single-job execution pipeline for the indexing worker.
//!
//! Given a dequeued [`idx_core::IndexJob`], the [`handler::Handler`] clones
//! the target commit into a temporary directory, runs the indexer in a
//! disposable container against it, and uploads the result to the frontend
//! API. The dequeue loop itself lives outside this crate; see
//! [`handler::JobHandler`] for the boundary.

pub mod clone_url;
pub mod env;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod options;

pub use error::{FetchError, HandleError};
pub use handler::{Handler, JobHandler};
pub use options::{HandlerOptions, OptionsError};
