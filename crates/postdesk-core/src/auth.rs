//! Credential exchange shared by the TUI and the CLI.
//!
//! A successful login persists token and display name first, then starts the
//! in-memory session so subscribers see a fully usable session.

use std::fmt;

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::Credentials;

#[derive(Debug)]
pub enum LoginError {
    /// The server rejected the credentials (401).
    InvalidCredentials,
    /// Any other request failure.
    Api(ApiError),
    /// The session could not be written to storage.
    Storage(anyhow::Error),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::InvalidCredentials => write!(f, "Invalid email or password"),
            LoginError::Api(e) => write!(f, "{e}"),
            LoginError::Storage(e) => write!(f, "Failed to save session: {e:#}"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Logs in and returns the display name now held by the session.
///
/// # Errors
/// Returns `LoginError` if the server rejects the request or storage fails.
pub async fn log_in(api: &ApiClient, credentials: &Credentials) -> Result<String, LoginError> {
    let response = api.log_in(credentials).await.map_err(|e| {
        if e.is_unauthorized() {
            LoginError::InvalidCredentials
        } else {
            LoginError::Api(e)
        }
    })?;

    let display_name = response.display_name();
    let session = api.session();
    session
        .persist_credentials(&response.token, &display_name)
        .and_then(|()| session.login(&display_name))
        .map_err(|e| {
            warn!("failed to persist session: {e:#}");
            LoginError::Storage(e)
        })?;

    info!(email = %credentials.email, "logged in");
    Ok(display_name)
}
