use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use moodtrack_core::editor::Phase;
use moodtrack_core::model::MoodCategory;

use crate::tui::{
    app::App,
    widgets::{help_bar::HelpBar, mood_color},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [title, picker, description, note, status, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3), // Mood picker
        Constraint::Length(2),
        Constraint::Min(5), // Note
        Constraint::Length(1),
        Constraint::Length(1), // Help bar
    ])
    .areas(area);

    let heading = if app.editor.is_update() {
        "Edit today's mood"
    } else {
        "How are you feeling today?"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            heading,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        title,
    );

    // Mood picker
    let selected = app.editor.selected();
    let mut spans = Vec::new();
    for category in MoodCategory::ALL {
        let color = mood_color(category);
        let style = if selected == Some(category) {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled(
            format!(" {} {} ", category.weight(), category.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    let picker_border = if app.editor_field == 0 {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(picker_border))
                .title(" Mood "),
        ),
        picker,
    );

    let blurb = selected
        .map(MoodCategory::description)
        .unwrap_or("Pick the colour that fits your day.");
    frame.render_widget(
        Paragraph::new(Span::styled(blurb, Style::default().fg(Color::DarkGray))),
        description,
    );

    // Note
    let note_border = if app.editor_field == 1 {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(app.editor.note())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(note_border))
                    .title(" Note "),
            ),
        note,
    );

    if app.editor_field == 1 {
        // Approximate cursor position (last line)
        let inner_width = note.width.saturating_sub(2) as usize;
        if inner_width > 0 {
            let text = app.editor.note();
            let last_line = text.rsplit('\n').next().unwrap_or("");
            let line_count = text.split('\n').count().max(1);
            let cursor_x = note.x + 1 + (last_line.chars().count() % inner_width) as u16;
            let cursor_y = note.y + 1 + (line_count as u16).saturating_sub(1);
            frame.set_cursor_position((
                cursor_x.min(note.right().saturating_sub(2)),
                cursor_y.min(note.bottom().saturating_sub(2)),
            ));
        }
    }

    let status_line = match (app.editor.phase(), app.editor.load_error()) {
        (Phase::Loading, _) => Span::styled(
            "Loading today's mood...",
            Style::default().fg(Color::Yellow),
        ),
        (Phase::Submitting, _) => Span::styled("Saving...", Style::default().fg(Color::Yellow)),
        (Phase::Idle, Some(e)) => Span::styled(
            format!("Couldn't load today's mood ({e}); saving will create a new one."),
            Style::default().fg(Color::Red),
        ),
        (Phase::Idle, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(status_line), status);

    frame.render_widget(
        HelpBar {
            screen: &app.screen,
        },
        help,
    );
}
