use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postdesk_core::models::Credentials;

use super::state::{LoginField, LoginState};
use crate::effects::UiEffect;
use crate::mutations::FeatureUpdate;

pub fn handle_key(state: &mut LoginState, key: KeyEvent) -> FeatureUpdate {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => FeatureUpdate::effect(UiEffect::Quit),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.toggle_focus();
            FeatureUpdate::none()
        }
        KeyCode::Enter if state.focus == LoginField::Email => {
            state.focus = LoginField::Password;
            FeatureUpdate::none()
        }
        KeyCode::Enter => submit(state),
        KeyCode::Char('s') if ctrl => submit(state),
        _ => {
            if state.focused_mut().input(key) {
                state.error = None;
            }
            FeatureUpdate::none()
        }
    }
}

pub fn handle_paste(state: &mut LoginState, text: &str) {
    state.focused_mut().insert_str(text);
}

fn submit(state: &mut LoginState) -> FeatureUpdate {
    if state.busy {
        return FeatureUpdate::none();
    }
    let email = state.email.value().trim().to_string();
    let password = state.password.value().to_string();
    if email.is_empty() || password.is_empty() {
        state.error = Some("Email and password are required".to_string());
        return FeatureUpdate::none();
    }

    state.busy = true;
    state.error = None;
    FeatureUpdate::effect(UiEffect::LogIn {
        mount: state.mount,
        credentials: Credentials { email, password },
    })
}

/// The session is already started; the gate moves us to the feed when the
/// session change arrives.
pub fn handle_succeeded(state: &mut LoginState) -> FeatureUpdate {
    state.busy = false;
    state.password.clear();
    FeatureUpdate::none()
}

pub fn handle_failed(state: &mut LoginState, message: String) -> FeatureUpdate {
    state.busy = false;
    state.password.clear();
    state.focus = LoginField::Password;
    state.error = Some(message);
    FeatureUpdate::none()
}
