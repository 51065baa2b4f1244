//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::common::{NoticeLevel, truncate_with_ellipsis};
use crate::state::{AppState, Screen};
use crate::{editor, feed, login, reader};

/// Notifications shown at once.
const MAX_VISIBLE_NOTICES: usize = 3;
const NOTICE_WIDTH: u16 = 48;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);

    render_header(app, frame, header_area);

    match &app.screen {
        Screen::Feed(state) => feed::render_feed(state, frame, body_area),
        Screen::Reader(state) => reader::render_reader(state, frame, body_area),
        Screen::Editor(state) => editor::render_editor(state, frame, body_area),
        Screen::Login(state) => login::render_login(state, frame, body_area),
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, body_area);
    }

    render_notifications(app, frame, body_area);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let left = vec![
        Span::styled(
            " postdesk ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.route().path(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            app.settings.api_base_url.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let right = if app.session.is_logged_in() {
        format!("{} ", app.session.display_name)
    } else {
        "not logged in ".to_string()
    };

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let available = usize::from(area.width).saturating_sub(left_width + 1);
    let right = truncate_with_ellipsis(&right, available);
    let padding = usize::from(area.width).saturating_sub(left_width + right.width());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right, Style::default().fg(Color::Cyan)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notifications(app: &AppState, frame: &mut Frame, area: Rect) {
    let width = NOTICE_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let x = area.x + area.width - width - 1;
    let mut y = area.y;

    for notice in app.notifications.visible(MAX_VISIBLE_NOTICES) {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        let inner_width = usize::from(width.saturating_sub(2)).max(1);
        let rows = notice.message.width().div_ceil(inner_width).clamp(1, 3);
        let height = u16::try_from(rows).unwrap_or(3) + 2;
        if y + height > area.y + area.height {
            break;
        }

        let rect = Rect::new(x, y, width, height);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        frame.render_widget(
            Paragraph::new(notice.message.as_str())
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use postdesk_core::models::{Author, Post, PostId};
    use postdesk_core::session::Session;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::common::Notice;
    use crate::effects::UiEffect;
    use crate::events::{FeedUiEvent, UiEvent};
    use crate::gate::Route;
    use crate::state::AppSettings;
    use crate::update::{navigate, update};

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn logged_in_app() -> AppState {
        AppState::new(
            Session {
                display_name: "Ada Lovelace".to_string(),
                token: Some("tok".to_string()),
            },
            AppSettings::default(),
        )
    }

    #[test]
    fn test_empty_feed_shows_loading() {
        let mut app = logged_in_app();
        navigate(&mut app, Route::Feed);
        let screen = draw(&app);
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Ada Lovelace"));
    }

    #[test]
    fn test_feed_shows_posts_and_status() {
        let mut app = logged_in_app();
        navigate(&mut app, Route::Feed);
        let mount = app.screen.mount();
        update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount,
                result: Ok(vec![Post {
                    id: PostId::from(1),
                    title: "Hello terminal".to_string(),
                    content: "body".to_string(),
                    image_url: Some("https://img.example/a.png".to_string()),
                    is_published: true,
                    author: Some(Author {
                        first_name: "Grace".to_string(),
                        last_name: "Hopper".to_string(),
                    }),
                    date: None,
                    comments: Vec::new(),
                }]),
            }),
        );

        let screen = draw(&app);
        assert!(screen.contains("Hello terminal"));
        assert!(screen.contains("Published"));
        assert!(screen.contains("By Grace Hopper"));
        assert!(!screen.contains("Loading..."));
    }

    fn hello_world(is_published: bool) -> Post {
        Post {
            id: PostId::from(1),
            title: "Hello World!".to_string(),
            content: "First post".to_string(),
            image_url: None,
            is_published,
            author: None,
            date: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_publish_toggle_flips_label() {
        let mut app = logged_in_app();
        navigate(&mut app, Route::Feed);
        let mount = app.screen.mount();
        update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::Loaded {
                mount,
                result: Ok(vec![hello_world(false)]),
            }),
        );
        assert!(draw(&app).contains("Unpublished"));

        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(' '),
                KeyModifiers::NONE,
            ))),
        );
        assert_eq!(
            effects,
            vec![UiEffect::SetPublished {
                mount,
                id: PostId::from(1),
                is_published: true,
            }]
        );

        update(
            &mut app,
            UiEvent::Feed(FeedUiEvent::PublishedUpdated {
                mount,
                id: PostId::from(1),
                result: Ok(hello_world(true)),
            }),
        );
        let screen = draw(&app);
        assert!(screen.contains("Published"));
        assert!(!screen.contains("Unpublished"));
    }

    #[test]
    fn test_login_screen_and_notice() {
        let mut app = AppState::new(Session::default(), AppSettings::default());
        app.notifications.push(Notice::error("Session expired"));
        let screen = draw(&app);
        assert!(screen.contains("Log in"));
        assert!(screen.contains("not logged in"));
        assert!(screen.contains("Session expired"));
    }
}
