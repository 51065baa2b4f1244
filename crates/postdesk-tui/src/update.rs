//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use postdesk_core::session::Session;

use crate::common::Notice;
use crate::effects::UiEffect;
use crate::events::{EditorUiEvent, FeedUiEvent, LoginUiEvent, ReaderUiEvent, UiEvent};
use crate::gate::{self, Route};
use crate::mutations::{FeatureUpdate, StateMutation};
use crate::overlays::OverlayUpdate;
use crate::state::{AppState, Screen};
use crate::{editor, feed, login, reader};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    if let Some(mount) = event.mount()
        && mount != app.screen.mount()
    {
        if event.is_unauthorized_mutation() && app.session.is_logged_in() {
            tracing::debug!(?mount, "401 from an unmounted screen");
            return apply_update(app, FeatureUpdate::mutation(StateMutation::SessionExpired));
        }
        tracing::debug!(?mount, "dropping result for unmounted screen");
        return vec![];
    }

    match event {
        UiEvent::Tick => {
            app.notifications.expire(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionChanged(session) => handle_session_changed(app, session),
        UiEvent::Feed(ev) => handle_feed_event(app, ev),
        UiEvent::Reader(ev) => handle_reader_event(app, ev),
        UiEvent::Editor(ev) => handle_editor_event(app, ev),
        UiEvent::Login(ev) => handle_login_event(app, ev),
    }
}

/// Mounts the screen for `route` after passing it through the gate.
///
/// Feed and reader mounts request their data exactly once.
pub fn navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    let route = gate::guard(route, &app.session);
    if route == Route::Login && matches!(app.screen, Screen::Login(_)) {
        app.overlay = None;
        return vec![];
    }

    let mount = app.mounts.next_id();
    app.overlay = None;
    let (screen, effects) = match route {
        Route::Feed => (
            Screen::Feed(feed::FeedState::new(mount)),
            vec![UiEffect::FetchFeed { mount }],
        ),
        Route::Reader(id) => (
            Screen::Reader(reader::ReaderState::new(mount, id.clone())),
            vec![UiEffect::FetchPost { mount, id }],
        ),
        Route::Editor => (
            Screen::Editor(editor::EditorState::new(
                mount,
                app.settings.editor_variant,
            )),
            vec![],
        ),
        Route::Login => (Screen::Login(login::LoginState::new(mount)), vec![]),
    };
    app.screen = screen;
    effects
}

/// Re-runs the gate against the new session.
fn handle_session_changed(app: &mut AppState, session: Session) -> Vec<UiEffect> {
    let was_logged_in = app.session.is_logged_in();
    app.session = session;
    if !was_logged_in && app.session.is_logged_in() {
        app.notifications.push(Notice::info(format!(
            "Logged in as {}",
            app.session.display_name
        )));
    }
    let current = app.route();

    if current == Route::Login {
        if app.session.is_logged_in() {
            return navigate(app, Route::Feed);
        }
        return vec![];
    }

    if gate::guard(current.clone(), &app.session) == current {
        vec![]
    } else {
        navigate(app, Route::Login)
    }
}

fn apply_update(app: &mut AppState, update: FeatureUpdate) -> Vec<UiEffect> {
    let mut effects = update.effects;
    for mutation in update.mutations {
        match mutation {
            StateMutation::Notify(notice) => app.notifications.push(notice),
            StateMutation::Navigate(route) => effects.extend(navigate(app, route)),
            StateMutation::OpenOverlay(overlay) => app.overlay = Some(overlay),
            StateMutation::SessionExpired => {
                app.notifications.push(Notice::error(SESSION_EXPIRED_MESSAGE));
                if !effects.contains(&UiEffect::Logout) {
                    effects.push(UiEffect::Logout);
                }
            }
        }
    }
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            match &mut app.screen {
                Screen::Editor(state) => editor::handle_paste(state, &text),
                Screen::Login(state) => login::handle_paste(state, &text),
                Screen::Feed(_) | Screen::Reader(_) => {}
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = &app.overlay {
        return match overlay.handle_key(key) {
            OverlayUpdate::Stay => vec![],
            OverlayUpdate::Close => {
                app.overlay = None;
                vec![]
            }
            OverlayUpdate::DeleteConfirmed(id) => {
                app.overlay = None;
                let Screen::Feed(state) = &mut app.screen else {
                    return vec![];
                };
                let update = feed::request_delete(state, id);
                apply_update(app, update)
            }
        };
    }

    let update = match &mut app.screen {
        Screen::Feed(state) => feed::handle_key(state, key),
        Screen::Reader(state) => reader::handle_key(state, key),
        Screen::Editor(state) => editor::handle_key(state, key),
        Screen::Login(state) => login::handle_key(state, key),
    };
    apply_update(app, update)
}

fn handle_feed_event(app: &mut AppState, event: FeedUiEvent) -> Vec<UiEffect> {
    let Screen::Feed(state) = &mut app.screen else {
        return vec![];
    };
    let update = match event {
        FeedUiEvent::Loaded { result, .. } => feed::handle_loaded(state, result),
        FeedUiEvent::PublishedUpdated { id, result, .. } => {
            feed::handle_published_updated(state, &id, result)
        }
        FeedUiEvent::Deleted { id, result, .. } => feed::handle_deleted(state, &id, result),
    };
    apply_update(app, update)
}

fn handle_reader_event(app: &mut AppState, event: ReaderUiEvent) -> Vec<UiEffect> {
    let Screen::Reader(state) = &mut app.screen else {
        return vec![];
    };
    let update = match event {
        ReaderUiEvent::Loaded { result, .. } => reader::handle_loaded(state, result),
    };
    apply_update(app, update)
}

fn handle_editor_event(app: &mut AppState, event: EditorUiEvent) -> Vec<UiEffect> {
    let Screen::Editor(state) = &mut app.screen else {
        return vec![];
    };
    let update = match event {
        EditorUiEvent::Submitted { result, .. } => editor::handle_submitted(state, result),
    };
    apply_update(app, update)
}

fn handle_login_event(app: &mut AppState, event: LoginUiEvent) -> Vec<UiEffect> {
    let Screen::Login(state) = &mut app.screen else {
        return vec![];
    };
    let update = match event {
        LoginUiEvent::Succeeded { display_name, .. } => {
            tracing::debug!(%display_name, "login confirmed");
            login::handle_succeeded(state)
        }
        LoginUiEvent::Failed { message, .. } => login::handle_failed(state, message),
    };
    apply_update(app, update)
}

#[cfg(test)]
mod tests {
    use postdesk_core::api::{ApiError, DeleteOutcome};
    use postdesk_core::models::{Post, PostId};

    use super::*;
    use crate::common::{MountId, NoticeLevel};
    use crate::state::AppSettings;

    fn logged_in() -> Session {
        Session {
            display_name: "Ada Lovelace".to_string(),
            token: Some("tok".to_string()),
        }
    }

    fn app(session: Session) -> AppState {
        AppState::new(session, AppSettings::default())
    }

    fn post(id: u64) -> Post {
        Post {
            id: PostId::from(id),
            title: format!("Post {id}"),
            content: "content".to_string(),
            image_url: None,
            is_published: false,
            author: None,
            date: None,
            comments: Vec::new(),
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Mounts the feed and delivers `posts`, returning the feed mount.
    fn feed_with(app: &mut AppState, posts: Vec<Post>) -> MountId {
        navigate(app, Route::Feed);
        let mount = app.screen.mount();
        update(
            app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount,
                result: Ok(posts),
            }),
        );
        mount
    }

    fn feed_len(app: &AppState) -> usize {
        match &app.screen {
            Screen::Feed(state) => state.feed.len(),
            other => panic!("expected feed, got {other:?}"),
        }
    }

    #[test]
    fn test_logged_out_start_lands_on_login() {
        let mut app = app(Session::default());
        let effects = navigate(&mut app, Route::Feed);
        assert!(effects.is_empty());
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn test_mounting_feed_fetches_exactly_once() {
        let mut app = app(logged_in());
        let effects = navigate(&mut app, Route::Feed);
        assert_eq!(
            effects,
            vec![UiEffect::FetchFeed {
                mount: app.screen.mount()
            }]
        );
    }

    #[test]
    fn test_mounting_reader_fetches_post() {
        let mut app = app(logged_in());
        let effects = navigate(&mut app, Route::Reader(PostId::from(12)));
        assert_eq!(
            effects,
            vec![UiEffect::FetchPost {
                mount: app.screen.mount(),
                id: PostId::from(12),
            }]
        );
    }

    #[test]
    fn test_logout_anywhere_redirects_to_login() {
        for route in [Route::Feed, Route::Editor, Route::Reader(PostId::from(1))] {
            let mut app = app(logged_in());
            navigate(&mut app, route);
            let effects = update(&mut app, UiEvent::SessionChanged(Session::default()));
            assert!(effects.is_empty());
            assert_eq!(app.route(), Route::Login);
        }
    }

    #[test]
    fn test_login_moves_to_feed() {
        let mut app = app(Session::default());
        navigate(&mut app, Route::Feed);
        let effects = update(&mut app, UiEvent::SessionChanged(logged_in()));
        assert_eq!(app.route(), Route::Feed);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchFeed { .. }]));
    }

    #[test]
    fn test_login_announces_name_in_delivery_order() {
        let mut app = app(Session::default());
        let login_mount = app.screen.mount();

        update(&mut app, UiEvent::SessionChanged(logged_in()));
        update(
            &mut app,
            UiEvent::Login(LoginUiEvent::Succeeded {
                mount: login_mount,
                display_name: "Ada Lovelace".to_string(),
            }),
        );

        assert_eq!(app.route(), Route::Feed);
        let notices: Vec<_> = app.notifications.visible(5).cloned().collect();
        assert_eq!(notices, vec![Notice::info("Logged in as Ada Lovelace")]);
    }

    #[test]
    fn test_session_refresh_does_not_announce_again() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Feed);
        update(&mut app, UiEvent::SessionChanged(logged_in()));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_session_refresh_keeps_current_screen() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Editor);
        let mount = app.screen.mount();
        update(&mut app, UiEvent::SessionChanged(logged_in()));
        assert_eq!(app.screen.mount(), mount);
    }

    #[test]
    fn test_result_for_unmounted_screen_is_dropped() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Feed);
        let stale = app.screen.mount();
        navigate(&mut app, Route::Reader(PostId::from(1)));

        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount: stale,
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert!(effects.is_empty());
        assert!(app.notifications.is_empty());
        assert_eq!(app.route(), Route::Reader(PostId::from(1)));
    }

    #[test]
    fn test_unauthorized_toggle_after_leaving_feed_still_logs_out() {
        let mut app = app(logged_in());
        let feed_mount = feed_with(&mut app, vec![post(1)]);
        let effects = update(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(
            effects,
            vec![UiEffect::SetPublished {
                mount: feed_mount,
                id: PostId::from(1),
                is_published: true,
            }]
        );

        navigate(&mut app, Route::Reader(PostId::from(1)));
        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::PublishedUpdated {
                mount: feed_mount,
                id: PostId::from(1),
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert_eq!(effects, vec![UiEffect::Logout]);
        let notices: Vec<_> = app.notifications.visible(5).cloned().collect();
        assert_eq!(notices, vec![Notice::error(SESSION_EXPIRED_MESSAGE)]);
        assert_eq!(app.route(), Route::Reader(PostId::from(1)));
    }

    #[test]
    fn test_unauthorized_create_after_leaving_editor_still_logs_out() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Editor);
        let editor_mount = app.screen.mount();
        navigate(&mut app, Route::Feed);

        let effects = update(
            &mut app,
            UiEvent::Editor(EditorUiEvent::Submitted {
                mount: editor_mount,
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert!(effects.contains(&UiEffect::Logout));
    }

    #[test]
    fn test_stale_unauthorized_after_logout_is_ignored() {
        let mut app = app(logged_in());
        let feed_mount = feed_with(&mut app, vec![post(1)]);
        update(&mut app, UiEvent::SessionChanged(Session::default()));

        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Deleted {
                mount: feed_mount,
                id: PostId::from(1),
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert!(effects.is_empty());
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_stale_non_auth_failure_is_dropped() {
        let mut app = app(logged_in());
        let feed_mount = feed_with(&mut app, vec![post(1)]);
        navigate(&mut app, Route::Editor);

        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Deleted {
                mount: feed_mount,
                id: PostId::from(1),
                result: Err(ApiError::http_status(500, "")),
            }),
        );
        assert!(effects.is_empty());
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_remount_ignores_earlier_fetch() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Feed);
        let first = app.screen.mount();
        navigate(&mut app, Route::Feed);

        update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount: first,
                result: Ok(vec![post(1)]),
            }),
        );
        assert_eq!(feed_len(&app), 0);
    }

    #[test]
    fn test_unauthorized_logs_out_and_notifies() {
        let mut app = app(logged_in());
        let mount = feed_with(&mut app, vec![post(1), post(2)]);

        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Deleted {
                mount,
                id: PostId::from(1),
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert_eq!(effects, vec![UiEffect::Logout]);
        assert_eq!(feed_len(&app), 2);
        let notices: Vec<_> = app.notifications.visible(5).cloned().collect();
        assert_eq!(notices, vec![Notice::error(SESSION_EXPIRED_MESSAGE)]);

        // The store then broadcasts the cleared session.
        update(&mut app, UiEvent::SessionChanged(Session::default()));
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn test_other_failure_only_notifies() {
        let mut app = app(logged_in());
        let mount = feed_with(&mut app, vec![post(1)]);
        let effects = update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount,
                result: Err(ApiError::http_status(503, "")),
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(feed_len(&app), 1);
        let notice = app.notifications.visible(1).next().cloned();
        assert_eq!(notice.map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut app = app(logged_in());
        let mount = feed_with(&mut app, vec![post(1), post(2)]);

        assert!(update(&mut app, key(KeyCode::Char('d'))).is_empty());
        assert!(app.overlay.is_some());

        // Keys go to the overlay while it is open.
        assert!(update(&mut app, key(KeyCode::Char('r'))).is_empty());

        let effects = update(&mut app, key(KeyCode::Char('y')));
        assert!(app.overlay.is_none());
        assert_eq!(
            effects,
            vec![UiEffect::DeletePost {
                mount,
                id: PostId::from(1),
            }]
        );

        update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Deleted {
                mount,
                id: PostId::from(1),
                result: Ok(DeleteOutcome::Deleted),
            }),
        );
        assert_eq!(feed_len(&app), 1);
    }

    #[test]
    fn test_cancelled_delete_sends_nothing() {
        let mut app = app(logged_in());
        feed_with(&mut app, vec![post(1)]);
        update(&mut app, key(KeyCode::Char('d')));
        let effects = update(&mut app, key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert_eq!(feed_len(&app), 1);
    }

    #[test]
    fn test_editor_success_returns_to_feed() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Editor);
        let mount = app.screen.mount();

        let effects = update(
            &mut app,
            UiEvent::Editor(EditorUiEvent::Submitted {
                mount,
                result: Ok(None),
            }),
        );
        assert_eq!(app.route(), Route::Feed);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchFeed { .. }]));
    }

    #[test]
    fn test_editor_unauthorized_notifies_too() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Editor);
        let mount = app.screen.mount();

        let effects = update(
            &mut app,
            UiEvent::Editor(EditorUiEvent::Submitted {
                mount,
                result: Err(ApiError::unauthorized()),
            }),
        );
        assert_eq!(effects, vec![UiEffect::Logout]);
        assert_eq!(app.notifications.len(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = app(logged_in());
        navigate(&mut app, Route::Editor);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_login_failure_stays_on_form() {
        let mut app = app(Session::default());
        let mount = app.screen.mount();
        update(
            &mut app,
            UiEvent::Login(LoginUiEvent::Failed {
                mount,
                message: "HTTP 401: bad".to_string(),
            }),
        );
        match &app.screen {
            Screen::Login(state) => assert_eq!(state.error.as_deref(), Some("HTTP 401: bad")),
            other => panic!("expected login, got {other:?}"),
        }
    }
}
