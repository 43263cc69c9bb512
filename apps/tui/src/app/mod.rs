// App module for the urgent-sales TUI
// Holds screen state and routes side effects

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, Focus, SaleDetail};
