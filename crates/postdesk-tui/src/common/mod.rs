//! Shared TUI building blocks.

mod mount;
mod notifications;
pub mod text;
mod text_field;

pub use mount::{MountId, MountSeq};
pub use notifications::{Notice, NoticeLevel, Notifications};
pub use text::truncate_with_ellipsis;
pub use text_field::TextField;
