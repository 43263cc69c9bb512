//! Search → select → analyze pipeline.

pub mod debounce;
pub mod session;

pub use debounce::{Debounced, Debouncer};
pub use session::{AnalysisRequest, Phase, SearchRequest, Session, Ticket};
