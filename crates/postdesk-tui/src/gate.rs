//! Routes and the access gate.
//!
//! Every screen except the login form requires an active session. The gate
//! runs before a screen is entered and again whenever the session changes.

use std::fmt;

use postdesk_core::models::PostId;
use postdesk_core::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Catch-all landing view.
    Feed,
    Reader(PostId),
    Editor,
    Login,
}

impl Route {
    /// Whether the route requires a logged-in session.
    pub fn is_gated(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Path shown in the header.
    pub fn path(&self) -> String {
        match self {
            Route::Feed => "/".to_string(),
            Route::Reader(id) => format!("/posts/{id}"),
            Route::Editor => "/posts/new".to_string(),
            Route::Login => "/log-in".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Redirects gated routes to the login form when nobody is logged in.
pub fn guard(route: Route, session: &Session) -> Route {
    if route.is_gated() && !session.is_logged_in() {
        Route::Login
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session {
            display_name: "Ada Lovelace".to_string(),
            token: Some("t".to_string()),
        }
    }

    #[test]
    fn test_logged_out_is_redirected() {
        let session = Session::default();
        assert_eq!(guard(Route::Feed, &session), Route::Login);
        assert_eq!(guard(Route::Editor, &session), Route::Login);
        assert_eq!(
            guard(Route::Reader(PostId::from(7)), &session),
            Route::Login
        );
        assert_eq!(guard(Route::Login, &session), Route::Login);
    }

    #[test]
    fn test_blank_name_counts_as_logged_out() {
        let session = Session {
            display_name: "   ".to_string(),
            token: Some("t".to_string()),
        };
        assert_eq!(guard(Route::Feed, &session), Route::Login);
    }

    #[test]
    fn test_logged_in_passes_through() {
        let session = logged_in();
        assert_eq!(guard(Route::Feed, &session), Route::Feed);
        assert_eq!(
            guard(Route::Reader(PostId::from(7)), &session),
            Route::Reader(PostId::from(7))
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Reader(PostId::from(3)).path(), "/posts/3");
        assert_eq!(Route::Editor.to_string(), "/posts/new");
    }
}
