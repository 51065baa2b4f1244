//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: Session           (snapshot of the shared session)
//! ├── screen: Screen             (exactly one mounted screen)
//! ├── overlay: Option<Overlay>   (modal confirmation)
//! └── notifications: Notifications
//! ```

use std::time::Duration;

use postdesk_core::config::Config;
use postdesk_core::session::Session;
use postdesk_core::validation::EditorVariant;

use crate::common::{MountId, MountSeq, Notifications};
use crate::editor::EditorState;
use crate::feed::FeedState;
use crate::gate::Route;
use crate::login::LoginState;
use crate::overlays::Overlay;
use crate::reader::ReaderState;

/// Settings the TUI reads once at startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub editor_variant: EditorVariant,
    pub notification_ttl: Duration,
    /// Shown in the header.
    pub api_base_url: String,
}

impl AppSettings {
    pub fn from_config(config: &Config, api_base_url: impl Into<String>) -> Self {
        Self {
            editor_variant: EditorVariant::from_publish_on_create(config.editor_publish_on_create),
            notification_ttl: config.notification_ttl(),
            api_base_url: api_base_url.into(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default(), Config::default().api_base_url)
    }
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginState),
    Feed(FeedState),
    Reader(ReaderState),
    Editor(EditorState),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Login(_) => Route::Login,
            Screen::Feed(_) => Route::Feed,
            Screen::Reader(s) => Route::Reader(s.id.clone()),
            Screen::Editor(_) => Route::Editor,
        }
    }

    pub fn mount(&self) -> MountId {
        match self {
            Screen::Login(s) => s.mount,
            Screen::Feed(s) => s.mount,
            Screen::Reader(s) => s.mount,
            Screen::Editor(s) => s.mount,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    pub notifications: Notifications,
    pub mounts: MountSeq,
    pub settings: AppSettings,
    pub should_quit: bool,
}

impl AppState {
    /// Creates state with the login form mounted. Call `update::navigate`
    /// to enter the first real route.
    pub fn new(session: Session, settings: AppSettings) -> Self {
        let mut mounts = MountSeq::default();
        let screen = Screen::Login(LoginState::new(mounts.next_id()));
        Self {
            session,
            screen,
            overlay: None,
            notifications: Notifications::new(settings.notification_ttl),
            mounts,
            settings,
            should_quit: false,
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }
}
