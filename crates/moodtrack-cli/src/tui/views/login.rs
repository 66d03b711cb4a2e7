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
    let [body, help] = Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).areas(area);
    let [column] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(body);
    let [title, email, password, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .areas(column);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Log in to moodtrack",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        title,
    );
    frame.render_widget(
        TextField {
            label: "Email",
            text: &app.login.email,
            focused: app.login.field == 0,
            masked: false,
        },
        email,
    );
    frame.render_widget(
        TextField {
            label: "Password",
            text: &app.login.password,
            focused: app.login.field == 1,
            masked: true,
        },
        password,
    );

    let hint = if app.busy {
        Span::styled("Logging in...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "No account? Press Ctrl+R to register.",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(hint)), status);

    frame.render_widget(
        HelpBar {
            screen: &app.screen,
        },
        help,
    );
}
