use super::tables::handle_panel_keys;
use crate::app::input::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crate::ui::widgets::charts::CHART_TABS;
use crossterm::event::KeyCode;

pub fn handle_charts_input(app: &mut App, key: KeyCode) {
    if handle_panel_keys(app, key) {
        return;
    }

    match key {
        KeyCode::Left => {
            app.chart_tab_index = wrap_decrement(app.chart_tab_index, CHART_TABS.len());
        }
        KeyCode::Right => {
            app.chart_tab_index = wrap_increment(app.chart_tab_index, CHART_TABS.len());
        }
        _ => {}
    }
}
