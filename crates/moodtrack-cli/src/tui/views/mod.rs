pub mod editor;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod report;
pub mod splash;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::{help_bar::HelpBar, tab_bar::TabBar};

/// Tab bar on top, help bar at the bottom. Returns the content area between.
fn tabbed_frame(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let [tabs, content, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(TabBar { screen: app.screen }, tabs);
    frame.render_widget(
        HelpBar {
            screen: &app.screen,
        },
        help,
    );
    content
}
