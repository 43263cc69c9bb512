// Export our modules for use in the binary and integration tests
pub mod analysis;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod logging;
pub mod search;
pub mod terminal;
pub mod ui;

pub use domain::{AnalysisResult, AreaFilter, Candidate, TradeType};
