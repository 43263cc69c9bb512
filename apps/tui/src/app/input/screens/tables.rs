use crate::app::input::step_clamped;
use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;

const PAGE_ROWS: isize = 5;

/// Row movement shared by the sales and bargain tables.
fn navigate(index: usize, key: KeyCode, len: usize) -> Option<usize> {
    let next = match key {
        KeyCode::Up => step_clamped(index, -1, len),
        KeyCode::Down => step_clamped(index, 1, len),
        KeyCode::PageUp => step_clamped(index, -PAGE_ROWS, len),
        KeyCode::PageDown => step_clamped(index, PAGE_ROWS, len),
        KeyCode::Home => 0,
        KeyCode::End => len.saturating_sub(1),
        _ => return None,
    };
    Some(next)
}

/// Keys every non-query panel understands. Returns `true` when consumed.
pub(super) fn handle_panel_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Esc | KeyCode::Char('/') => app.focus = Focus::Query,
        KeyCode::Char('q') => app.quit(),
        _ => return false,
    }
    true
}

pub fn handle_sales_input(app: &mut App, key: KeyCode) {
    if handle_panel_keys(app, key) {
        return;
    }

    if let Some(index) = navigate(app.selected_sale_index, key, app.sales_len()) {
        app.selected_sale_index = index;
        return;
    }

    match key {
        KeyCode::Left => app.cycle_area_filter(false),
        KeyCode::Right => app.cycle_area_filter(true),
        KeyCode::Enter => app.open_sale_detail(),
        _ => {}
    }
}

pub fn handle_bargains_input(app: &mut App, key: KeyCode) {
    if handle_panel_keys(app, key) {
        return;
    }

    if let Some(index) = navigate(app.selected_bargain_index, key, app.bargains_len()) {
        app.selected_bargain_index = index;
        return;
    }

    if key == KeyCode::Enter {
        app.open_bargain_detail();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_and_jumps() {
        assert_eq!(navigate(0, KeyCode::Up, 10), Some(0));
        assert_eq!(navigate(0, KeyCode::PageDown, 10), Some(5));
        assert_eq!(navigate(8, KeyCode::PageDown, 10), Some(9));
        assert_eq!(navigate(4, KeyCode::Home, 10), Some(0));
        assert_eq!(navigate(4, KeyCode::End, 10), Some(9));
        assert_eq!(navigate(0, KeyCode::End, 0), Some(0));
        assert_eq!(navigate(0, KeyCode::Enter, 10), None);
    }
}
