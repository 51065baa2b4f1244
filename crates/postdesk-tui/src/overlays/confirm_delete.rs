//! Yes/no confirmation before deleting a post.

use crossterm::event::{KeyCode, KeyEvent};
use postdesk_core::models::PostId;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_overlay_container,
};
use crate::common::text::single_line;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 7;

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub id: PostId,
    pub title: String,
}

impl ConfirmDeleteState {
    pub fn new(id: PostId, title: String) -> Self {
        Self { id, title }
    }

    pub fn handle_key(&self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                OverlayUpdate::DeleteConfirmed(self.id.clone())
            }
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => OverlayUpdate::Close,
            _ => OverlayUpdate::Stay,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = calculate_overlay_area(area, WIDTH, HEIGHT);
        let inner = render_overlay_container(frame, popup, "Delete post", Color::Red);

        let question = Line::from(vec![
            Span::raw("Are you sure you want to delete "),
            Span::styled(
                format!("\"{}\"", single_line(&self.title)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]);
        let body = Rect::new(
            inner.x + 1,
            inner.y + 1,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );
        frame.render_widget(
            Paragraph::new(question)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );

        render_hints(
            frame,
            inner,
            &[InputHint::new("y", "delete"), InputHint::new("n", "cancel")],
            Color::Red,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_yes_confirms_no_cancels() {
        let state = ConfirmDeleteState::new(PostId::from(9), "Doomed".to_string());
        assert_eq!(
            state.handle_key(key(KeyCode::Char('y'))),
            OverlayUpdate::DeleteConfirmed(PostId::from(9))
        );
        assert_eq!(state.handle_key(key(KeyCode::Char('n'))), OverlayUpdate::Close);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), OverlayUpdate::Close);
        assert_eq!(state.handle_key(key(KeyCode::Char('x'))), OverlayUpdate::Stay);
    }
}
