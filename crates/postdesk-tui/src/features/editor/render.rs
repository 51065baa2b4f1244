use postdesk_core::validation::DraftField;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{EditorField, EditorState};
use crate::common::TextField;
use crate::overlays::render_utils::{InputHint, render_hints};

const CURSOR: &str = "█";

pub fn render_editor(state: &EditorState, frame: &mut Frame, area: Rect) {
    let has_toggle = state.fields().contains(&EditorField::Published);
    let error_rows = u16::try_from(state.errors.len()).unwrap_or(u16::MAX);

    let [
        title_area,
        image_area,
        content_area,
        toggle_area,
        errors_area,
        hints_area,
    ] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(u16::from(has_toggle)),
        Constraint::Length(error_rows),
        Constraint::Length(1),
    ])
    .areas(area);

    render_field(
        frame,
        title_area,
        state,
        EditorField::Title,
        &state.title,
        has_error(state, DraftField::Title),
    );
    render_field(
        frame,
        image_area,
        state,
        EditorField::ImageUrl,
        &state.image_url,
        false,
    );
    render_field(
        frame,
        content_area,
        state,
        EditorField::Content,
        &state.content,
        has_error(state, DraftField::Content),
    );

    if has_toggle {
        let focused = state.focus == EditorField::Published;
        let checkbox = if state.is_published { "[x]" } else { "[ ]" };
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {checkbox} Publish immediately"),
                style,
            ))),
            toggle_area,
        );
    }

    let error_lines: Vec<Line> = state
        .errors
        .messages()
        .map(|msg| Line::from(Span::styled(format!(" ✗ {msg}"), Style::default().fg(Color::Red))))
        .collect();
    frame.render_widget(Paragraph::new(error_lines), errors_area);

    let mut hints = vec![
        InputHint::new("tab", "next field"),
        InputHint::new("ctrl+s", "save"),
        InputHint::new("esc", "cancel"),
    ];
    if state.submitting {
        hints.insert(0, InputHint::new("…", "saving"));
    }
    render_hints(frame, hints_area, &hints, Color::Cyan);
}

fn has_error(state: &EditorState, field: DraftField) -> bool {
    state.errors.for_field(field).next().is_some()
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    state: &EditorState,
    which: EditorField,
    field: &TextField,
    invalid: bool,
) {
    let focused = state.focus == which;
    let border = if invalid {
        Color::Red
    } else if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", which.label()));

    let mut para = Paragraph::new(field_lines(field, focused)).block(block);
    if field.is_multiline() {
        para = para.wrap(Wrap { trim: false });
    }
    frame.render_widget(para, area);
}

/// Splits a field value into lines with a cursor glyph at the caret.
fn field_lines(field: &TextField, focused: bool) -> Vec<Line<'static>> {
    let (before, after) = field.split_at_cursor();
    let before_lines: Vec<&str> = before.split('\n').collect();
    let after_lines: Vec<&str> = after.split('\n').collect();

    let mut lines: Vec<Line<'static>> = before_lines[..before_lines.len() - 1]
        .iter()
        .map(|l| Line::from((*l).to_string()))
        .collect();

    let mut caret_line = vec![Span::raw(before_lines[before_lines.len() - 1].to_string())];
    if focused {
        caret_line.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
    }
    caret_line.push(Span::raw(after_lines[0].to_string()));
    lines.push(Line::from(caret_line));

    lines.extend(
        after_lines[1..]
            .iter()
            .map(|l| Line::from((*l).to_string())),
    );

    lines
}
