use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Single-line labelled input with a block cursor when focused.
pub struct TextField<'a> {
    pub label: &'a str,
    pub text: &'a str,
    pub focused: bool,
    /// Render `•` per character instead of the text.
    pub masked: bool,
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.label));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let shown = if self.masked {
            "•".repeat(self.text.chars().count())
        } else {
            self.text.to_string()
        };

        // Keep the tail visible when the text is wider than the field.
        let room = (inner.width as usize).saturating_sub(1);
        let skip = shown.chars().count().saturating_sub(room);
        let visible: String = shown.chars().skip(skip).collect();

        let mut spans = vec![Span::raw(visible)];
        if self.focused {
            spans.push(Span::styled(
                " ",
                Style::default()
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
