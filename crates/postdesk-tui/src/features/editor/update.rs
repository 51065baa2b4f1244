//! Editor reducer.
//!
//! Validation runs before anything is sent. A valid submit clears the form
//! immediately; the outcome only decides between navigating away and a
//! notification.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postdesk_core::api::ApiError;
use postdesk_core::models::Post;
use postdesk_core::validation::validate;

use super::state::{EditorField, EditorState};
use crate::common::Notice;
use crate::effects::UiEffect;
use crate::features::api_failure;
use crate::gate::Route;
use crate::mutations::{FeatureUpdate, StateMutation};

pub fn handle_key(state: &mut EditorState, key: KeyEvent) -> FeatureUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => submit(state),
        KeyCode::Esc => FeatureUpdate::navigate(Route::Feed),
        KeyCode::Tab => {
            state.focus_next();
            FeatureUpdate::none()
        }
        KeyCode::BackTab => {
            state.focus_prev();
            FeatureUpdate::none()
        }
        KeyCode::Enter | KeyCode::Char(' ') if state.focus == EditorField::Published => {
            state.is_published = !state.is_published;
            FeatureUpdate::none()
        }
        KeyCode::Enter if state.focus != EditorField::Content => {
            state.focus_next();
            FeatureUpdate::none()
        }
        _ => {
            if let Some(field) = state.focused_text_mut() {
                field.input(key);
            }
            FeatureUpdate::none()
        }
    }
}

pub fn handle_paste(state: &mut EditorState, text: &str) {
    if let Some(field) = state.focused_text_mut() {
        field.insert_str(text);
    }
}

fn submit(state: &mut EditorState) -> FeatureUpdate {
    if state.submitting {
        return FeatureUpdate::none();
    }

    match validate(&state.draft(), state.variant) {
        Err(errors) => {
            state.errors = errors;
            FeatureUpdate::none()
        }
        Ok(request) => {
            state.clear_form();
            state.submitting = true;
            FeatureUpdate::effect(UiEffect::CreatePost {
                mount: state.mount,
                request,
            })
        }
    }
}

pub fn handle_submitted(
    state: &mut EditorState,
    result: Result<Option<Post>, ApiError>,
) -> FeatureUpdate {
    state.submitting = false;
    match result {
        Ok(_) => FeatureUpdate {
            effects: Vec::new(),
            mutations: vec![
                StateMutation::Notify(Notice::info("Post saved")),
                StateMutation::Navigate(Route::Feed),
            ],
        },
        Err(e) => api_failure(&e, "Error saving the post"),
    }
}
