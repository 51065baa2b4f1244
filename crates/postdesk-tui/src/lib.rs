//! Full-screen TUI for postdesk.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod gate;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{editor, feed, login, reader};
use postdesk_core::api::ApiClient;
use postdesk_core::config::Config;
pub use runtime::TuiRuntime;

use crate::gate::Route;
use crate::state::AppSettings;

/// Runs the interactive admin until the user quits.
///
/// Must be called from within a tokio runtime context (`Runtime::enter`).
///
/// # Errors
/// Returns an error if no terminal is attached or terminal I/O fails.
pub fn run_interactive(config: &Config, api: ApiClient) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `postdesk posts list` and friends for scripted use."
        );
    }

    let settings = AppSettings::from_config(config, api.base_url());
    tracing::info!(base_url = api.base_url(), "starting interactive session");

    let mut runtime = TuiRuntime::new(api, settings)?;
    runtime.run(Route::Feed)
}
