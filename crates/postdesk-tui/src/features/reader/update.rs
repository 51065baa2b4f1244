use crossterm::event::{KeyCode, KeyEvent};
use postdesk_core::api::ApiError;
use postdesk_core::models::Post;

use super::state::ReaderState;
use crate::effects::UiEffect;
use crate::features::api_failure;
use crate::gate::Route;
use crate::mutations::FeatureUpdate;

const PAGE: u16 = 10;

pub fn handle_key(state: &mut ReaderState, key: KeyEvent) -> FeatureUpdate {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            FeatureUpdate::navigate(Route::Feed)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll = state.scroll.saturating_sub(1);
            FeatureUpdate::none()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll = state.scroll.saturating_add(1);
            FeatureUpdate::none()
        }
        KeyCode::PageUp => {
            state.scroll = state.scroll.saturating_sub(PAGE);
            FeatureUpdate::none()
        }
        KeyCode::PageDown => {
            state.scroll = state.scroll.saturating_add(PAGE);
            FeatureUpdate::none()
        }
        KeyCode::Char('r') => FeatureUpdate::effect(UiEffect::FetchPost {
            mount: state.mount,
            id: state.id.clone(),
        }),
        KeyCode::Char('L') => FeatureUpdate::effect(UiEffect::Logout),
        KeyCode::Char('q') => FeatureUpdate::effect(UiEffect::Quit),
        _ => FeatureUpdate::none(),
    }
}

/// Replaces the displayed post wholesale with the server copy.
pub fn handle_loaded(state: &mut ReaderState, result: Result<Post, ApiError>) -> FeatureUpdate {
    match result {
        Ok(post) => {
            state.post = Some(post);
            FeatureUpdate::none()
        }
        Err(e) => api_failure(&e, "Error fetching post"),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use postdesk_core::models::PostId;

    use super::*;
    use crate::common::MountId;
    use crate::mutations::StateMutation;

    fn post(title: &str) -> Post {
        Post {
            id: PostId::from(5),
            title: title.to_string(),
            content: "body".to_string(),
            image_url: None,
            is_published: true,
            author: None,
            date: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_loaded_replaces_post() {
        let mut state = ReaderState::new(MountId(0), PostId::from(5));
        handle_loaded(&mut state, Ok(post("first")));
        handle_loaded(&mut state, Ok(post("second")));
        assert_eq!(state.post.as_ref().map(|p| p.title.as_str()), Some("second"));
    }

    #[test]
    fn test_failure_keeps_previous_post() {
        let mut state = ReaderState::new(MountId(0), PostId::from(5));
        handle_loaded(&mut state, Ok(post("kept")));
        let update = handle_loaded(&mut state, Err(ApiError::http_status(404, "")));
        assert_eq!(state.post.as_ref().map(|p| p.title.as_str()), Some("kept"));
        assert!(matches!(
            update.mutations.as_slice(),
            [StateMutation::Notify(_)]
        ));
    }

    #[test]
    fn test_unauthorized_expires_session() {
        let mut state = ReaderState::new(MountId(0), PostId::from(5));
        let update = handle_loaded(&mut state, Err(ApiError::unauthorized()));
        assert!(state.post.is_none());
        assert!(matches!(
            update.mutations.as_slice(),
            [StateMutation::SessionExpired]
        ));
    }

    #[test]
    fn test_escape_returns_to_feed() {
        let mut state = ReaderState::new(MountId(0), PostId::from(5));
        let update = handle_key(&mut state, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(
            update.mutations.as_slice(),
            [StateMutation::Navigate(Route::Feed)]
        ));
    }
}
