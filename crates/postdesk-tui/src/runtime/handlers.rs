//! Effect handlers.
//!
//! Pure async functions that perform one API call and return the resulting
//! `UiEvent`. The runtime spawns them and forwards the event to the inbox.

use postdesk_core::api::ApiClient;
use postdesk_core::auth;
use postdesk_core::models::{CreatePostRequest, Credentials, PostId};
use postdesk_core::session::SessionStore;
use tracing::warn;

use crate::common::MountId;
use crate::events::{EditorUiEvent, FeedUiEvent, LoginUiEvent, ReaderUiEvent, UiEvent};

pub async fn fetch_feed(api: ApiClient, mount: MountId) -> UiEvent {
    UiEvent::Feed(FeedUiEvent::Loaded {
        mount,
        result: api.list_posts().await,
    })
}

pub async fn fetch_post(api: ApiClient, mount: MountId, id: PostId) -> UiEvent {
    UiEvent::Reader(ReaderUiEvent::Loaded {
        mount,
        result: api.get_post(&id).await,
    })
}

pub async fn set_published(
    api: ApiClient,
    mount: MountId,
    id: PostId,
    is_published: bool,
) -> UiEvent {
    let result = api.set_published(&id, is_published).await;
    UiEvent::Feed(FeedUiEvent::PublishedUpdated { mount, id, result })
}

pub async fn delete_post(api: ApiClient, mount: MountId, id: PostId) -> UiEvent {
    let result = api.delete_post(&id).await;
    UiEvent::Feed(FeedUiEvent::Deleted { mount, id, result })
}

pub async fn create_post(api: ApiClient, mount: MountId, request: CreatePostRequest) -> UiEvent {
    UiEvent::Editor(EditorUiEvent::Submitted {
        mount,
        result: api.create_post(&request).await,
    })
}

pub async fn log_in(api: ApiClient, mount: MountId, credentials: Credentials) -> UiEvent {
    let event = match auth::log_in(&api, &credentials).await {
        Ok(display_name) => LoginUiEvent::Succeeded {
            mount,
            display_name,
        },
        Err(e) => LoginUiEvent::Failed {
            mount,
            message: e.to_string(),
        },
    };
    UiEvent::Login(event)
}

/// Clears the session. Subscribers see the change and the gate redirects.
pub fn logout(session: &SessionStore) {
    if let Err(e) = session.logout() {
        warn!("logout could not clear storage: {e:#}");
    }
}
