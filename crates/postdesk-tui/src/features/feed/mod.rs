//! Feed screen: every post with publish toggles and delete.

mod render;
mod state;
mod update;

pub use render::render_feed;
pub use state::FeedState;
pub use update::{
    handle_deleted, handle_key, handle_loaded, handle_published_updated, request_delete,
};
