use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_query_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.type_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Down => app.move_candidate(true),
        KeyCode::Up => app.move_candidate(false),
        KeyCode::Enter => {
            app.select_highlighted_candidate();
        }
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Esc => {
            if app.session.query().is_empty() {
                app.quit();
            } else {
                app.clear_query();
            }
        }
        _ => {}
    }
}
