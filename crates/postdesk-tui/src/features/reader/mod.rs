//! Reader screen: one post with its comments.

mod render;
mod state;
mod update;

pub use render::render_reader;
pub use state::ReaderState;
pub use update::{handle_key, handle_loaded};
