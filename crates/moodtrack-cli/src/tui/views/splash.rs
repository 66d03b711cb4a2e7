use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use moodtrack_core::model::MoodCategory;

use crate::tui::widgets::mood_color;

const LOGO: &[&str] = &[
    r"                       _ _                  _    ",
    r" _ __ ___   ___   ___ | | |_ _ __ __ _  ___| | __",
    r"| '_ ` _ \ / _ \ / _ \/ _` __| '__/ _` |/ __| |/ /",
    r"| | | | | | (_) | (_) | (_| |_| | | (_| | (__|   < ",
    r"|_| |_| |_|\___/ \___/ \__,_\__|_|  \__,_|\___|_|\_\",
];

pub fn render(frame: &mut Frame, area: Rect, backend: &str) {
    let block_height = LOGO.len() as u16 + 7;
    let block_width = 56;

    let [center_y] = Layout::vertical([Constraint::Length(block_height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(block_width)])
        .flex(Flex::Center)
        .areas(center_y);

    let mut lines: Vec<Line> = Vec::new();

    for row in LOGO {
        lines.push(Line::from(Span::styled(
            *row,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "          How are you feeling today?",
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(Line::from(""));

    // One dot per mood, best to worst
    let mut dots = vec![Span::raw("                    ")];
    for category in MoodCategory::ALL {
        dots.push(Span::styled(
            "● ",
            Style::default().fg(mood_color(category)),
        ));
    }
    lines.push(Line::from(dots));

    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("    backend ", Style::default().fg(Color::DarkGray)),
        Span::styled(backend, Style::default().fg(Color::Magenta)),
    ]));

    frame.render_widget(Paragraph::new(lines), center);
}
