use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use moodtrack_core::report::{FetchState, NO_NOTE, TODAY_MISSING};

use crate::tui::{
    app::App,
    widgets::{hex_color, recommendation_card::RecommendationCard},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let content = super::tabbed_frame(frame, app, area);

    let [greeting, today, action, recommendation] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Min(5),
    ])
    .areas(content);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Hello, ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.session.display_name(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        greeting,
    );

    let dim = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = match app.home.today() {
        FetchState::Loading => vec![Line::from(Span::styled("Loading...", dim))],
        FetchState::Empty => vec![Line::from(Span::styled(TODAY_MISSING, dim))],
        FetchState::Failed(e) => vec![Line::from(Span::styled(
            format!("Couldn't load today's mood: {e}"),
            Style::default().fg(Color::Red),
        ))],
        FetchState::Ready(record) => {
            let note = match record.note_text() {
                Some(note) => Span::raw(note),
                None => Span::styled(NO_NOTE, dim.add_modifier(Modifier::ITALIC)),
            };
            vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(hex_color(&record.color))),
                    Span::styled(
                        record.mood.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", record.date.format("%d %b %Y")), dim),
                ]),
                Line::from(note),
            ]
        }
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim)
                .title(" Today's mood "),
        ),
        today,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" [e] ", Style::default().fg(Color::Cyan)),
            Span::styled(
                app.home.editor_label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])),
        action,
    );

    frame.render_widget(
        RecommendationCard {
            period: app.home.period(),
            state: app.home.recommendation(),
        },
        recommendation,
    );
}
