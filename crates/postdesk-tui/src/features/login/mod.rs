//! Login screen: email and password form.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginField, LoginState};
pub use update::{handle_failed, handle_key, handle_paste, handle_succeeded};
