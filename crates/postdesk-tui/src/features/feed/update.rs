//! Feed reducer.

use crossterm::event::{KeyCode, KeyEvent};
use postdesk_core::api::{ApiError, DeleteOutcome};
use postdesk_core::models::{Post, PostId};

use super::state::FeedState;
use crate::effects::UiEffect;
use crate::features::api_failure;
use crate::gate::Route;
use crate::mutations::{FeatureUpdate, StateMutation};
use crate::overlays::{ConfirmDeleteState, Overlay};

pub fn handle_key(state: &mut FeedState, key: KeyEvent) -> FeatureUpdate {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            FeatureUpdate::none()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            FeatureUpdate::none()
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.select_first();
            FeatureUpdate::none()
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.select_last();
            FeatureUpdate::none()
        }
        KeyCode::Enter => match state.selected_post() {
            Some(post) => FeatureUpdate::navigate(Route::Reader(post.id.clone())),
            None => FeatureUpdate::none(),
        },
        KeyCode::Char(' ' | 'p') => toggle_published(state),
        KeyCode::Char('d') | KeyCode::Delete => confirm_delete(state),
        KeyCode::Char('n') => FeatureUpdate::navigate(Route::Editor),
        KeyCode::Char('r') => FeatureUpdate::effect(UiEffect::FetchFeed { mount: state.mount }),
        KeyCode::Char('L') => FeatureUpdate::effect(UiEffect::Logout),
        KeyCode::Char('q') | KeyCode::Esc => FeatureUpdate::effect(UiEffect::Quit),
        _ => FeatureUpdate::none(),
    }
}

/// Flips the selected post locally and asks the server to persist it.
fn toggle_published(state: &mut FeedState) -> FeatureUpdate {
    let Some(post) = state.selected_post() else {
        return FeatureUpdate::none();
    };
    let id = post.id.clone();
    if state.is_toggle_pending(&id) || state.is_delete_pending(&id) {
        return FeatureUpdate::none();
    }

    let target = !post.is_published;
    if let Some(previous) = state.feed.set_published(&id, target) {
        state.pending_toggles.insert(id.clone(), previous);
    }

    FeatureUpdate::effect(UiEffect::SetPublished {
        mount: state.mount,
        id,
        is_published: target,
    })
}

fn confirm_delete(state: &FeedState) -> FeatureUpdate {
    match state.selected_post() {
        Some(post) if !state.is_delete_pending(&post.id) => {
            FeatureUpdate::mutation(StateMutation::OpenOverlay(Overlay::ConfirmDelete(
                ConfirmDeleteState::new(post.id.clone(), post.title.clone()),
            )))
        }
        _ => FeatureUpdate::none(),
    }
}

/// Sends a delete the user has confirmed.
pub fn request_delete(state: &mut FeedState, id: PostId) -> FeatureUpdate {
    if state.feed.get(&id).is_none() || !state.pending_deletes.insert(id.clone()) {
        return FeatureUpdate::none();
    }
    FeatureUpdate::effect(UiEffect::DeletePost {
        mount: state.mount,
        id,
    })
}

pub fn handle_loaded(state: &mut FeedState, result: Result<Vec<Post>, ApiError>) -> FeatureUpdate {
    match result {
        Ok(posts) => {
            state.feed.replace_all(posts);
            state.pending_toggles.clear();
            state.clamp_selection();
            FeatureUpdate::none()
        }
        Err(e) => api_failure(&e, "Failed to fetch posts"),
    }
}

/// Applies the server's copy on success; rolls the optimistic flip back on
/// any failure.
pub fn handle_published_updated(
    state: &mut FeedState,
    id: &PostId,
    result: Result<Post, ApiError>,
) -> FeatureUpdate {
    let previous = state.pending_toggles.remove(id);
    match result {
        Ok(post) => {
            state.feed.splice(post);
            FeatureUpdate::none()
        }
        Err(e) => {
            if let Some(previous) = previous {
                state.feed.set_published(id, previous);
            }
            api_failure(&e, "Failed updating published status")
        }
    }
}

pub fn handle_deleted(
    state: &mut FeedState,
    id: &PostId,
    result: Result<DeleteOutcome, ApiError>,
) -> FeatureUpdate {
    state.pending_deletes.remove(id);
    match result {
        Ok(DeleteOutcome::Deleted) => {
            state.feed.remove(id);
            state.pending_toggles.remove(id);
            state.clamp_selection();
            FeatureUpdate::none()
        }
        Ok(DeleteOutcome::Unconfirmed(status)) => {
            tracing::debug!(%id, status, "delete not confirmed; keeping entry");
            FeatureUpdate::none()
        }
        Err(e) => api_failure(&e, "Error deleting the post"),
    }
}
