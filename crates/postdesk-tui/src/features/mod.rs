//! Feature slices, one per screen.
//!
//! Each slice owns its state, a reducer returning `FeatureUpdate`, and a pure
//! render function.

pub mod editor;
pub mod feed;
pub mod login;
pub mod reader;

use postdesk_core::api::ApiError;

use crate::common::Notice;
use crate::mutations::{FeatureUpdate, StateMutation};

/// Maps a failed request to the shared failure policy: 401 expires the
/// session, everything else becomes an error notification.
pub(crate) fn api_failure(error: &ApiError, context: &str) -> FeatureUpdate {
    if error.is_unauthorized() {
        FeatureUpdate::mutation(StateMutation::SessionExpired)
    } else {
        FeatureUpdate::notify(Notice::error(format!("{context}: {}", error.message)))
    }
}
