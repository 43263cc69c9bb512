//! Event loop, headless runner, and the messages background tasks send back
//! to the loop.

mod headless;
mod loop_handler;

pub use headless::{analysis_report, run_headless, search_report, AnalysisReport, SearchReport};
pub use loop_handler::run;

use crate::api::ApiError;
use crate::domain::{AnalysisResult, Candidate};
use crate::search::{Debounced, Ticket};

/// Completion reported by a timer or network task.
#[derive(Debug)]
pub enum AppEvent {
    QueryDebounced(Debounced<String>),
    SearchFinished {
        ticket: Ticket,
        result: Result<Vec<Candidate>, ApiError>,
    },
    AnalysisFinished {
        ticket: Ticket,
        result: Result<AnalysisResult, ApiError>,
    },
}
