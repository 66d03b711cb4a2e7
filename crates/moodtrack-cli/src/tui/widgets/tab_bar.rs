use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

use crate::tui::app::{Screen, TABS};

/// Home / Report / Profile tabs with the active one highlighted.
pub struct TabBar {
    pub screen: Screen,
}

fn title(screen: Screen) -> &'static str {
    match screen {
        Screen::Report => "Report",
        Screen::Profile => "Profile",
        _ => "Home",
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selected = TABS.iter().position(|s| *s == self.screen);
        let titles = TABS.iter().map(|s| Line::from(format!(" {} ", title(*s))));
        Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│")
            .render(area, buf);
    }
}
