use crate::api::ListingApi;
use crate::event::AppEvent;
use crate::search::{AnalysisRequest, Debounced, Debouncer, SearchRequest};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Side effects of the urgent-sales screen: the search debounce and the
/// network calls. Every outcome comes back to the event loop as an
/// [`AppEvent`].
pub struct AppActions {
    api: Arc<dyn ListingApi>,
    events: UnboundedSender<AppEvent>,
    debouncer: Debouncer<String>,
}

impl fmt::Debug for AppActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppActions")
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(
        api: Arc<dyn ListingApi>,
        debounce: Duration,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            api,
            events,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Restart the debounce window for `keyword`.
    pub fn schedule_search(&mut self, keyword: String) {
        let events = self.events.clone();
        self.debouncer.schedule(keyword, move |fired| {
            // The loop may already be gone during shutdown.
            let _ = events.send(AppEvent::QueryDebounced(fired));
        });
    }

    pub fn cancel_pending_search(&mut self) {
        self.debouncer.cancel();
    }

    /// Unwraps a debounce firing unless a later keystroke superseded it.
    pub fn accept_debounced(&mut self, fired: Debounced<String>) -> Option<String> {
        self.debouncer.accept(fired)
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn spawn_search(&self, request: SearchRequest) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = api.search_complexes(&request.keyword).await;
            let _ = events.send(AppEvent::SearchFinished {
                ticket: request.ticket,
                result,
            });
        });
    }

    pub fn spawn_analysis(&self, request: AnalysisRequest) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = api
                .fetch_analysis(&request.complex_id, request.trade_type)
                .await;
            let _ = events.send(AppEvent::AnalysisFinished {
                ticket: request.ticket,
                result,
            });
        });
    }

    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
    }
}
