// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker configuration, fixed at startup.

use thiserror::Error;

/// Externally reachable base URL of the frontend API.
pub const ENV_FRONTEND_URL: &str = "IDX_FRONTEND_URL";
/// The same endpoint as reachable from inside the indexing container.
pub const ENV_FRONTEND_URL_FROM_DOCKER: &str = "IDX_FRONTEND_URL_FROM_DOCKER";
/// Token used to construct per-clone credentials.
pub const ENV_AUTH_TOKEN: &str = "IDX_AUTH_TOKEN";

/// Immutable handler configuration, read once at worker startup.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Base URL the worker itself reaches the frontend at; clone URLs are
    /// derived from it.
    pub frontend_url: String,
    /// Frontend endpoint as seen from the container network; the upload
    /// sub-command is pointed here.
    pub frontend_url_from_docker: String,
    /// Auth token attached to clone URLs as the password half of the
    /// `indexer` credential pair.
    pub auth_token: String,
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

impl HandlerOptions {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, OptionsError> {
        Ok(Self {
            frontend_url: require(ENV_FRONTEND_URL)?,
            frontend_url_from_docker: require(ENV_FRONTEND_URL_FROM_DOCKER)?,
            auth_token: require(ENV_AUTH_TOKEN)?,
        })
    }
}

fn require(name: &'static str) -> Result<String, OptionsError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(OptionsError::Missing(name)),
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
