use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use moodtrack_core::model::{weight_color, MoodCategory, Period};
use moodtrack_core::report::ChartPoint;

use super::hex_color;

/// Line chart of mood weight (1-5) against day of month. Each point takes
/// the colour of its weight.
pub struct MoodChart<'a> {
    pub period: Period,
    pub points: &'a [ChartPoint],
}

/// `(day, weight)` pairs for the trend line. Days outside `period` are left out.
pub fn trend(period: Period, points: &[ChartPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| period.contains(p.date))
        .map(|p| (f64::from(p.date.day0() + 1), f64::from(p.value)))
        .collect()
}

/// Points split by weight so each group can carry its own colour.
pub fn by_weight(period: Period, points: &[ChartPoint]) -> Vec<(u8, Vec<(f64, f64)>)> {
    MoodCategory::ALL
        .iter()
        .map(|c| c.weight())
        .filter_map(|weight| {
            let group: Vec<(f64, f64)> = points
                .iter()
                .filter(|p| p.value == weight && period.contains(p.date))
                .map(|p| (f64::from(p.date.day0() + 1), f64::from(weight)))
                .collect();
            (!group.is_empty()).then_some((weight, group))
        })
        .collect()
}

impl Widget for MoodChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = trend(self.period, self.points);
        let groups = by_weight(self.period, self.points);

        let mut datasets = vec![Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&line)];
        for (weight, data) in &groups {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(hex_color(weight_color(*weight))))
                    .data(data),
            );
        }

        let last_day = self.period.days();

        let x_axis = Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds([1.0, f64::from(last_day)])
            .labels([
                Span::raw("01"),
                Span::raw(format!("{:02}", last_day.div_ceil(2))),
                Span::raw(format!("{last_day:02}")),
            ]);
        let y_axis = Axis::default()
            .style(Style::default().fg(Color::DarkGray))
            .bounds([0.5, 5.5])
            .labels(["1", "2", "3", "4", "5"].map(Span::raw));

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" Mood chart · {} ", self.period)),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, value: u8) -> ChartPoint {
        ChartPoint {
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            day_label: format!("{day:02}"),
            value,
            color: weight_color(value),
            mood: String::new(),
        }
    }

    fn april() -> Period {
        Period::new(4, 2025).unwrap()
    }

    #[test]
    fn test_trend_uses_day_of_month() {
        let points = [point(1, 5), point(3, 2)];
        assert_eq!(trend(april(), &points), vec![(1.0, 5.0), (3.0, 2.0)]);
    }

    #[test]
    fn test_days_outside_period_are_not_plotted() {
        let mut stray = point(2, 4);
        stray.date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let points = [stray, point(3, 2)];
        assert_eq!(trend(april(), &points), vec![(3.0, 2.0)]);
        assert_eq!(by_weight(april(), &points), vec![(2, vec![(3.0, 2.0)])]);
    }

    #[test]
    fn test_by_weight_groups_best_first() {
        let points = [point(1, 2), point(2, 5), point(3, 2)];
        let groups = by_weight(april(), &points);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], (5, vec![(2.0, 5.0)]));
        assert_eq!(groups[1], (2, vec![(1.0, 2.0), (3.0, 2.0)]));
    }

    #[test]
    fn test_renders_without_points() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        MoodChart {
            period: Period::new(4, 2025).unwrap(),
            points: &[],
        }
        .render(area, &mut buf);
    }
}
