use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{LoginField, LoginState};
use crate::common::TextField;
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, render_hints, render_overlay_container,
};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 10;

pub fn render_login(state: &LoginState, frame: &mut Frame, area: Rect) {
    let popup = calculate_overlay_area(area, FORM_WIDTH, FORM_HEIGHT);
    let inner = render_overlay_container(frame, popup, "Log in", Color::Cyan);
    if inner.height < 6 {
        return;
    }

    let row = |offset: u16| {
        Rect::new(
            inner.x + 1,
            inner.y + offset,
            inner.width.saturating_sub(2),
            1,
        )
    };

    frame.render_widget(
        input_line(
            "Email    ",
            &state.email,
            state.focus == LoginField::Email,
            false,
        ),
        row(1),
    );
    frame.render_widget(
        input_line(
            "Password ",
            &state.password,
            state.focus == LoginField::Password,
            true,
        ),
        row(2),
    );

    let status = if state.busy {
        Line::from(Span::styled("Logging in…", Style::default().fg(Color::DarkGray)))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), row(4));

    render_hints(
        frame,
        inner,
        &[
            InputHint::new("tab", "switch"),
            InputHint::new("enter", "log in"),
            InputHint::new("esc", "quit"),
        ],
        Color::Cyan,
    );
}

fn input_line(label: &str, field: &TextField, focused: bool, masked: bool) -> Paragraph<'static> {
    let (before, after) = field.split_at_cursor();
    let (before, after) = if masked {
        (
            "•".repeat(before.chars().count()),
            "•".repeat(after.chars().count()),
        )
    } else {
        (before.to_string(), after.to_string())
    };

    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(label.to_string(), label_style), Span::raw(before)];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    spans.push(Span::raw(after));
    Paragraph::new(Line::from(spans))
}
