pub mod help_bar;
pub mod mood_chart;
pub mod recommendation_card;
pub mod tab_bar;
pub mod text_field;

use ratatui::style::Color;

/// Terminal colour for a `#RRGGBB` string; grey when it doesn't parse.
pub fn hex_color(hex: &str) -> Color {
    match moodtrack_core::model::hex_to_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

/// Terminal colour of a mood category.
pub fn mood_color(category: moodtrack_core::model::MoodCategory) -> Color {
    let (r, g, b) = category.rgb();
    Color::Rgb(r, g, b)
}
