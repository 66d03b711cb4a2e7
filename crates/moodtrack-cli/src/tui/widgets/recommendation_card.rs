use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use moodtrack_core::model::{Period, Recommendation};
use moodtrack_core::report::FetchState;

use super::hex_color;

/// The month's recommendation, accented by its level.
pub struct RecommendationCard<'a> {
    pub period: Period,
    pub state: &'a FetchState<Recommendation>,
}

impl Widget for RecommendationCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(Color::DarkGray);
        let title = format!(" Recommendation · {} ", self.period);

        let (accent, lines) = match self.state {
            FetchState::Loading => (
                Color::DarkGray,
                vec![Line::from(Span::styled("Loading...", dim))],
            ),
            FetchState::Empty => (
                Color::DarkGray,
                vec![Line::from(Span::styled(
                    "No recommendation for this month yet.",
                    dim,
                ))],
            ),
            FetchState::Failed(e) => (
                Color::Red,
                vec![Line::from(Span::styled(
                    format!("Couldn't load: {e}"),
                    Style::default().fg(Color::Red),
                ))],
            ),
            FetchState::Ready(rec) => {
                let accent = hex_color(rec.level.accent());
                let badge = Style::default()
                    .fg(accent)
                    .bg(hex_color(rec.level.background()))
                    .add_modifier(Modifier::BOLD);
                (
                    accent,
                    vec![
                        Line::from(vec![
                            Span::styled(
                                format!(" {} ", rec.level.to_string().to_uppercase()),
                                badge,
                            ),
                            Span::styled(
                                format!(
                                    "  ·  average {:.1}  ·  {} low day{}",
                                    rec.average_mood,
                                    rec.low_mood_days,
                                    if rec.low_mood_days == 1 { "" } else { "s" }
                                ),
                                dim,
                            ),
                        ]),
                        Line::from(""),
                        Line::from(rec.recommendation.as_str()),
                    ],
                )
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(accent))
                    .title(title),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtrack_core::model::MoodLevel;

    #[test]
    fn test_level_badge_uses_level_background() {
        let state = FetchState::Ready(Recommendation {
            average_mood: 2.1,
            low_mood_days: 9,
            level: MoodLevel::Bad,
            recommendation: "Take a walk.".into(),
        });
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        RecommendationCard {
            period: Period::new(4, 2025).unwrap(),
            state: &state,
        }
        .render(area, &mut buf);

        let badge = (1..area.width - 1)
            .map(|x| &buf[(x, 1)])
            .find(|cell| cell.symbol() == "B")
            .expect("level badge on the first line");
        assert_eq!(badge.bg, hex_color(MoodLevel::Bad.background()));
        assert_eq!(badge.fg, hex_color(MoodLevel::Bad.accent()));
    }
}
