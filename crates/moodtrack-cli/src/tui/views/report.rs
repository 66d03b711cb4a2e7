use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use moodtrack_core::model::Period;
use moodtrack_core::report::{FetchState, MonthlyReport};

use crate::tui::{
    app::App,
    widgets::{hex_color, mood_chart::MoodChart},
};

/// `‹ Mar  [Apr]  May ›` with the selected month centred.
fn month_selector(period: Period) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let prev = period.prev();
    let next = period.next();
    Line::from(vec![
        Span::styled("‹ ", Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} {}  ", prev.short_month_name(), prev.year), dim),
        Span::styled(
            format!("[{period}]"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {} {}", next.short_month_name(), next.year), dim),
        Span::styled(" ›", Style::default().fg(Color::Cyan)),
    ])
}

fn daily_list(report: &MonthlyReport) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(report.records.len() + 1);
    if let Some(avg) = report.average() {
        lines.push(Line::from(Span::styled(
            format!("{} days recorded · average {avg:.1}", report.points.len()),
            dim,
        )));
    }
    for record in &report.records {
        let mut spans = vec![
            Span::styled(format!("{}  ", record.date.format("%a %d")), dim),
            Span::styled("● ", Style::default().fg(hex_color(&record.color))),
            Span::styled(format!("{:<14}", record.mood), Style::default()),
        ];
        if let Some(note) = record.note_text() {
            spans.push(Span::styled(note, dim));
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let content = super::tabbed_frame(frame, app, area);

    let [selector, chart, list] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Percentage(55),
        Constraint::Min(3),
    ])
    .areas(content);

    let period = app.report.period();
    frame.render_widget(Paragraph::new(month_selector(period)).centered(), selector);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Daily moods ");

    match app.report.state() {
        FetchState::Ready(report) => {
            frame.render_widget(
                MoodChart {
                    period,
                    points: &report.points,
                },
                chart,
            );
            frame.render_widget(
                Paragraph::new(daily_list(report))
                    .scroll((app.report_scroll, 0))
                    .block(list_block),
                list,
            );
        }
        state => {
            let message = match state {
                FetchState::Loading => Span::styled(
                    format!("Loading {period}..."),
                    Style::default().fg(Color::Yellow),
                ),
                FetchState::Failed(e) => Span::styled(
                    format!("Couldn't load {period}: {e}"),
                    Style::default().fg(Color::Red),
                ),
                _ => Span::styled(
                    format!("No moods recorded in {period}."),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            frame.render_widget(
                MoodChart {
                    period,
                    points: &[],
                },
                chart,
            );
            frame.render_widget(Paragraph::new(Line::from(message)).block(list_block), list);
        }
    }
}
