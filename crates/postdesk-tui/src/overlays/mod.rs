//! Modal overlays.
//!
//! An open overlay takes every key until it closes.

mod confirm_delete;
pub mod render_utils;

pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
use postdesk_core::models::PostId;
use ratatui::Frame;
use ratatui::layout::Rect;

/// What the reducer should do after an overlay handled a key.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayUpdate {
    Stay,
    Close,
    /// The user confirmed deleting this post.
    DeleteConfirmed(PostId),
}

#[derive(Debug)]
pub enum Overlay {
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::ConfirmDelete(c) => c.render(frame, area),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::ConfirmDelete(c) => c.handle_key(key),
        }
    }
}
