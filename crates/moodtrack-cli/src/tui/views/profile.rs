use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use moodtrack_core::model::DEFAULT_AVATAR_URL;

use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let content = super::tabbed_frame(frame, app, area);
    let [card, _] = Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(content);

    let label = Style::default().fg(Color::DarkGray);
    let user = app.session.user.as_ref();
    let email = user.map(|u| u.email.as_str()).unwrap_or("");
    let avatar = user.map(|u| u.avatar_url()).unwrap_or(DEFAULT_AVATAR_URL);

    let lines = vec![
        Line::from(Span::styled(
            app.session.display_name(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("email   ", label), Span::raw(email)]),
        Line::from(vec![Span::styled("avatar  ", label), Span::raw(avatar)]),
        Line::from(vec![
            Span::styled("status  ", label),
            Span::styled("Active", Style::default().fg(Color::Green)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Profile "),
        ),
        card,
    );
}
