use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{
    app::App,
    widgets::{help_bar::HelpBar, text_field::TextField},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [body, help] = Layout::vertical([Constraint::Min(13), Constraint::Length(1)]).areas(area);
    let [column] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(body);
    let [title, name, email, password, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .areas(column);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Create an account",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        title,
    );

    let fields = [
        ("Name", app.register.name.as_str(), name, false),
        ("Email", app.register.email.as_str(), email, false),
        ("Password", app.register.password.as_str(), password, true),
    ];
    for (i, (label, text, rect, masked)) in fields.into_iter().enumerate() {
        frame.render_widget(
            TextField {
                label,
                text,
                focused: app.register.field == i,
                masked,
            },
            rect,
        );
    }

    if app.busy {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Registering...",
                Style::default().fg(Color::Yellow),
            )),
            status,
        );
    }

    frame.render_widget(
        HelpBar {
            screen: &app.screen,
        },
        help,
    );
}
