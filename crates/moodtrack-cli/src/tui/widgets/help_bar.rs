use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::tui::app::Screen;

/// Bottom help bar showing context-sensitive key bindings.
pub struct HelpBar<'a> {
    pub screen: &'a Screen,
}

impl HelpBar<'_> {
    fn bindings(&self) -> &'static [(&'static str, &'static str)] {
        match self.screen {
            Screen::Splash => &[("q", "quit")],
            Screen::Login => &[
                ("Tab", "next field"),
                ("Enter", "log in"),
                ("Ctrl+R", "register"),
                ("Esc", "quit"),
            ],
            Screen::Register => &[
                ("Tab", "next field"),
                ("Enter", "register"),
                ("Esc", "back to login"),
            ],
            Screen::Home => &[
                ("e", "edit mood"),
                ("r", "refresh"),
                ("Tab", "next tab"),
                ("q", "quit"),
            ],
            Screen::Report => &[
                ("←/→", "month"),
                ("j/k", "scroll"),
                ("r", "refresh"),
                ("Tab", "next tab"),
                ("q", "quit"),
            ],
            Screen::Editor => &[
                ("←/→", "mood"),
                ("1-5", "pick"),
                ("Tab", "note"),
                ("Ctrl+S", "save"),
                ("Esc", "back"),
            ],
            Screen::Profile => &[("o", "log out"), ("Tab", "next tab"), ("q", "quit")],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let bindings = self.bindings();
        let mut spans: Vec<Span> = Vec::with_capacity(bindings.len() * 2);
        for (i, (key, label)) in bindings.iter().enumerate() {
            spans.push(Span::styled(*key, key_style));
            let sep = if i + 1 < bindings.len() { "  " } else { "" };
            spans.push(Span::styled(format!(" {label}{sep}"), style));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
