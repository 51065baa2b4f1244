//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer returns effects; API calls are
//! spawned on tokio and their results come back through the inbox, which is
//! drained once per frame. Session changes are picked up from the store's
//! watch channel and fed to the reducer as `SessionChanged`.
//!
//! Must be driven from inside a tokio runtime context.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use postdesk_core::api::ApiClient;
use postdesk_core::session::Session;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::gate::Route;
use crate::state::{AppSettings, AppState};
use crate::{render, terminal, update};

/// Tick cadence: drives notification expiry and redraws.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    session_rx: watch::Receiver<Session>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and seeds state from the current session.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(api: ApiClient, settings: AppSettings) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let session_rx = api.session().subscribe();
        let state = AppState::new(api.session().session(), settings);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            session_rx,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Mounts `initial` (through the gate) and runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal input or drawing fails.
    pub fn run(&mut self, initial: Route) -> Result<()> {
        let effects = update::navigate(&mut self.state, initial);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            dirty |= !events.is_empty();

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if self.session_rx.has_changed().unwrap_or(false) {
            let session = self.session_rx.borrow_and_update().clone();
            events.push(UiEvent::SessionChanged(session));
        }

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work queued.
        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a handler and forwards its event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let api = self.api.clone();
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::FetchFeed { mount } => {
                self.spawn_effect(move || handlers::fetch_feed(api, mount));
            }
            UiEffect::FetchPost { mount, id } => {
                self.spawn_effect(move || handlers::fetch_post(api, mount, id));
            }
            UiEffect::SetPublished {
                mount,
                id,
                is_published,
            } => {
                self.spawn_effect(move || handlers::set_published(api, mount, id, is_published));
            }
            UiEffect::DeletePost { mount, id } => {
                self.spawn_effect(move || handlers::delete_post(api, mount, id));
            }
            UiEffect::CreatePost { mount, request } => {
                self.spawn_effect(move || handlers::create_post(api, mount, request));
            }
            UiEffect::LogIn { mount, credentials } => {
                self.spawn_effect(move || handlers::log_in(api, mount, credentials));
            }
            UiEffect::Logout => handlers::logout(self.api.session()),
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
