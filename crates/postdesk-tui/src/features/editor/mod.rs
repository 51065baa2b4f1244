//! Editor screen: compose and submit a new post.

mod render;
mod state;
mod update;

pub use render::render_editor;
pub use state::{EditorField, EditorState};
pub use update::{handle_key, handle_paste, handle_submitted};
