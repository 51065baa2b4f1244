//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, the frame tick, session
//! changes, and results of effects delivered through the runtime inbox.

use crossterm::event::Event;
use postdesk_core::api::{ApiError, DeleteOutcome};
use postdesk_core::models::{Post, PostId};
use postdesk_core::session::Session;

use crate::common::MountId;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Tick,
    Terminal(Event),
    /// The shared session changed (login or logout from anywhere).
    SessionChanged(Session),
    Feed(FeedUiEvent),
    Reader(ReaderUiEvent),
    Editor(EditorUiEvent),
    Login(LoginUiEvent),
}

#[derive(Debug, Clone)]
pub enum FeedUiEvent {
    Loaded {
        mount: MountId,
        result: Result<Vec<Post>, ApiError>,
    },
    PublishedUpdated {
        mount: MountId,
        id: PostId,
        result: Result<Post, ApiError>,
    },
    Deleted {
        mount: MountId,
        id: PostId,
        result: Result<DeleteOutcome, ApiError>,
    },
}

#[derive(Debug, Clone)]
pub enum ReaderUiEvent {
    Loaded {
        mount: MountId,
        result: Result<Post, ApiError>,
    },
}

#[derive(Debug, Clone)]
pub enum EditorUiEvent {
    Submitted {
        mount: MountId,
        result: Result<Option<Post>, ApiError>,
    },
}

#[derive(Debug, Clone)]
pub enum LoginUiEvent {
    Succeeded { mount: MountId, display_name: String },
    Failed { mount: MountId, message: String },
}

impl UiEvent {
    /// Mount that requested this result, for events that carry one.
    pub fn mount(&self) -> Option<MountId> {
        match self {
            UiEvent::Feed(
                FeedUiEvent::Loaded { mount, .. }
                | FeedUiEvent::PublishedUpdated { mount, .. }
                | FeedUiEvent::Deleted { mount, .. },
            )
            | UiEvent::Reader(ReaderUiEvent::Loaded { mount, .. })
            | UiEvent::Editor(EditorUiEvent::Submitted { mount, .. })
            | UiEvent::Login(
                LoginUiEvent::Succeeded { mount, .. } | LoginUiEvent::Failed { mount, .. },
            ) => Some(*mount),
            UiEvent::Tick | UiEvent::Terminal(_) | UiEvent::SessionChanged(_) => None,
        }
    }

    /// True for a mutating action's result that failed with 401.
    ///
    /// The session policy applies to these even after their screen is gone.
    pub fn is_unauthorized_mutation(&self) -> bool {
        match self {
            UiEvent::Feed(FeedUiEvent::PublishedUpdated {
                result: Err(e), ..
            }) => e.is_unauthorized(),
            UiEvent::Feed(FeedUiEvent::Deleted { result: Err(e), .. }) => e.is_unauthorized(),
            UiEvent::Editor(EditorUiEvent::Submitted { result: Err(e), .. }) => {
                e.is_unauthorized()
            }
            _ => false,
        }
    }
}
