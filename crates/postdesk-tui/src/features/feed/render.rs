use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::FeedState;
use crate::common::text::single_line;
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, render_hints};

/// Rows per post: headline, details, spacer.
const ROWS_PER_POST: u16 = 3;

pub fn render_feed(state: &FeedState, frame: &mut Frame, area: Rect) {
    let [list_area, hints_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    if state.feed.is_empty() {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        let y = list_area.y + list_area.height / 2;
        frame.render_widget(loading, Rect::new(list_area.x, y, list_area.width, 1));
    } else {
        render_posts(state, frame, list_area);
    }

    render_hints(
        frame,
        hints_area,
        &[
            InputHint::new("↑↓", "select"),
            InputHint::new("space", "publish"),
            InputHint::new("enter", "read"),
            InputHint::new("d", "delete"),
            InputHint::new("n", "new"),
            InputHint::new("r", "refresh"),
            InputHint::new("L", "log out"),
            InputHint::new("q", "quit"),
        ],
        Color::Cyan,
    );
}

fn render_posts(state: &FeedState, frame: &mut Frame, area: Rect) {
    let visible = usize::from((area.height / ROWS_PER_POST).max(1));
    let first = state.selected.saturating_sub(visible - 1);
    let width = usize::from(area.width.saturating_sub(2));

    let mut lines = Vec::new();
    for (index, post) in state.feed.iter().enumerate().skip(first).take(visible) {
        let selected = index == state.selected;
        let marker = if selected { "▶ " } else { "  " };

        let (checkbox, status_color) = if post.is_published {
            ("[x]", Color::Green)
        } else {
            ("[ ]", Color::Yellow)
        };
        let pending = state.is_toggle_pending(&post.id) || state.is_delete_pending(&post.id);

        let mut title_style = Style::default().add_modifier(Modifier::BOLD);
        if selected {
            title_style = title_style.fg(Color::Cyan);
        }

        let status = format!("{checkbox} {:<11} ", post.status_label());
        let title_width = width.saturating_sub(status.chars().count() + 2);
        let mut headline = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(status, Style::default().fg(status_color)),
            Span::styled(
                truncate_with_ellipsis(&single_line(&post.title), title_width),
                title_style,
            ),
        ];
        if pending {
            headline.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(headline));

        let mut details = Vec::new();
        let byline = post.byline();
        if !byline.is_empty() {
            details.push(byline);
        }
        let date = post.display_date();
        if !date.is_empty() {
            details.push(date);
        }
        details.push(match post.image() {
            Some(url) => format!("image: {url}"),
            None => "no image".to_string(),
        });
        lines.push(Line::from(Span::styled(
            format!(
                "    {}",
                truncate_with_ellipsis(&details.join(" · "), width.saturating_sub(4))
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), area);
}
