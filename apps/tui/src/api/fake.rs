//! Scripted in-memory backend for unit and integration tests.
//!
//! Compiled under `cfg(test)` and behind the `test-util` feature, which the
//! crate's own integration tests enable.

use super::{ApiError, ListingApi};
use crate::domain::{AnalysisResult, Candidate, TradeType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type Scripted<T> = (Duration, Result<T, (u16, Option<String>)>);

/// Unscripted searches answer with no candidates, unscripted analyses with
/// a bare 404. Every request is recorded before its delay starts.
#[derive(Default)]
pub struct FakeApi {
    searches: Mutex<HashMap<String, Scripted<Vec<Candidate>>>>,
    analyses: Mutex<HashMap<String, Scripted<AnalysisResult>>>,
    calls: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, keyword: &str, delay: Duration, candidates: Vec<Candidate>) -> Self {
        lock(&self.searches).insert(keyword.to_string(), (delay, Ok(candidates)));
        self
    }

    pub fn with_search_error(self, keyword: &str, status: u16) -> Self {
        lock(&self.searches).insert(keyword.to_string(), (Duration::ZERO, Err((status, None))));
        self
    }

    pub fn with_analysis(self, id: &str, delay: Duration, result: AnalysisResult) -> Self {
        lock(&self.analyses).insert(id.to_string(), (delay, Ok(result)));
        self
    }

    pub fn with_analysis_error(self, id: &str, status: u16, message: Option<&str>) -> Self {
        lock(&self.analyses).insert(
            id.to_string(),
            (Duration::ZERO, Err((status, message.map(str::to_string)))),
        );
        self
    }

    /// Every request seen so far, as `search:<kw>` or `analysis:<id>:<code>`.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("search:"))
            .collect()
    }

    pub fn analysis_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("analysis:"))
            .collect()
    }
}

fn settle<T>(
    scripted: Option<Scripted<T>>,
    missing: Result<T, (u16, Option<String>)>,
) -> (Duration, Result<T, ApiError>) {
    let (delay, outcome) = scripted.unwrap_or((Duration::ZERO, missing));
    let outcome = outcome.map_err(|(status, message)| ApiError::Status { status, message });
    (delay, outcome)
}

#[async_trait]
impl ListingApi for FakeApi {
    async fn search_complexes(&self, keyword: &str) -> Result<Vec<Candidate>, ApiError> {
        lock(&self.calls).push(format!("search:{keyword}"));
        let scripted = lock(&self.searches).get(keyword).cloned();
        let (delay, outcome) = settle(scripted, Ok(Vec::new()));
        tokio::time::sleep(delay).await;
        outcome
    }

    async fn fetch_analysis(
        &self,
        complex_id: &str,
        trade_type: TradeType,
    ) -> Result<AnalysisResult, ApiError> {
        lock(&self.calls).push(format!("analysis:{complex_id}:{}", trade_type.as_code()));
        let scripted = lock(&self.analyses).get(complex_id).cloned();
        let (delay, outcome) = settle(scripted, Err((404, None)));
        tokio::time::sleep(delay).await;
        outcome
    }
}
