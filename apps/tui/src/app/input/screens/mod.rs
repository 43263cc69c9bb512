use crate::app::state::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

mod charts;
mod detail;
mod help;
mod query;
mod tables;

pub fn dispatch_input(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if help::handle_help_toggle(app, key.code) {
        return;
    }

    if app.detail.is_some() {
        detail::handle_detail_input(app, key.code);
        return;
    }

    match app.focus {
        Focus::Query => query::handle_query_input(app, key.code),
        Focus::Sales => tables::handle_sales_input(app, key.code),
        Focus::Bargains => tables::handle_bargains_input(app, key.code),
        Focus::Charts => charts::handle_charts_input(app, key.code),
    }
}
