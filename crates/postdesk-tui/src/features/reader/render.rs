use postdesk_core::models::{Author, format_post_date};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::ReaderState;
use crate::common::text::display_content;
use crate::overlays::render_utils::{InputHint, render_hints};

pub fn render_reader(state: &ReaderState, frame: &mut Frame, area: Rect) {
    let [body_area, hints_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    match &state.post {
        None => {
            let loading = Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            let y = body_area.y + body_area.height / 2;
            frame.render_widget(loading, Rect::new(body_area.x, y, body_area.width, 1));
        }
        Some(post) => {
            let dim = Style::default().fg(Color::DarkGray);
            let mut lines = vec![Line::from(vec![
                Span::styled(post.display_date(), dim),
                Span::raw("   "),
                Span::styled(post.byline(), dim),
            ])];
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(url) = post.image() {
                lines.push(Line::from(Span::styled(
                    format!("[image] {url}"),
                    Style::default().fg(Color::Blue),
                )));
            }
            lines.push(Line::default());
            for text_line in display_content(&post.content).lines() {
                lines.push(Line::from(text_line.to_string()));
            }

            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Comments ({})", post.comments.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for comment in &post.comments {
                let author = comment
                    .author
                    .as_ref()
                    .map(Author::full_name)
                    .unwrap_or_else(|| "Anonymous".to_string());
                let date = comment
                    .date
                    .as_deref()
                    .map(format_post_date)
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(author, Style::default().fg(Color::Cyan)),
                    Span::raw(" "),
                    Span::styled(date, dim),
                ]));
                lines.push(Line::from(format!("  {}", comment.content)));
            }

            let para = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0));
            frame.render_widget(para, body_area);
        }
    }

    render_hints(
        frame,
        hints_area,
        &[
            InputHint::new("esc", "back"),
            InputHint::new("↑↓", "scroll"),
            InputHint::new("r", "reload"),
            InputHint::new("L", "log out"),
        ],
        Color::Cyan,
    );
}
