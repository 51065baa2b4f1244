//! Interactive mode.

use anyhow::Result;
use postdesk_core::config::Config;

/// Runs the full-screen admin. Requires an entered tokio runtime.
pub fn run(config: &Config) -> Result<()> {
    let api = super::client(config)?;
    postdesk_tui::run_interactive(config, api)
}
