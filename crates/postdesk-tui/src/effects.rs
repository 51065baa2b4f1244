//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never calls the API or touches the
//! session store itself.

use postdesk_core::models::{CreatePostRequest, Credentials, PostId};

use crate::common::MountId;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// `GET /posts` for the mounted feed.
    FetchFeed { mount: MountId },

    /// `GET /posts/{id}` for the mounted reader.
    FetchPost { mount: MountId, id: PostId },

    /// `PUT /posts/{id}` with only `isPublished`.
    SetPublished {
        mount: MountId,
        id: PostId,
        is_published: bool,
    },

    /// `DELETE /posts/{id}` (already confirmed by the user).
    DeletePost { mount: MountId, id: PostId },

    /// `POST /posts` with a validated request.
    CreatePost {
        mount: MountId,
        request: CreatePostRequest,
    },

    /// Exchange credentials, persist them, and start the session.
    LogIn {
        mount: MountId,
        credentials: Credentials,
    },

    /// Clear the session and persisted credentials.
    Logout,
}
