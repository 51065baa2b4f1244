//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod posts;
pub mod tui;

use std::sync::Arc;

use anyhow::{Context, Result};
use postdesk_core::api::{ApiClient, ApiError};
use postdesk_core::config::Config;
use postdesk_core::session::{FileStorage, SessionStore};
use tracing::warn;

/// Opens the persisted session under `POSTDESK_HOME`.
fn open_session() -> Result<SessionStore> {
    SessionStore::load(Arc::new(FileStorage::default_location())).context("load session")
}

/// Builds a client bound to the persisted session.
fn client(config: &Config) -> Result<ApiClient> {
    ApiClient::from_config(config, open_session()?)
}

/// Builds a client for commands that require a logged-in session.
fn gated_client(config: &Config) -> Result<ApiClient> {
    let api = client(config)?;
    if !api.session().is_logged_in() {
        anyhow::bail!("Not logged in. Run `postdesk login --email <EMAIL>` first.");
    }
    Ok(api)
}

/// Converts an API failure into a command error.
///
/// A 401 ends the session before reporting, the same as in the TUI.
fn api_failure(api: &ApiClient, err: ApiError, context: &str) -> anyhow::Error {
    if err.is_unauthorized() {
        if let Err(e) = api.session().logout() {
            warn!("failed to clear session after 401: {e:#}");
        }
        return anyhow::anyhow!("Session expired. Please log in again.");
    }
    anyhow::Error::new(err).context(context.to_string())
}
