use std::sync::Arc;

use crate::analysis;
use crate::api::{ApiError, ApiOperation};
use crate::domain::{AnalysisResult, AreaFilter, Candidate, SaleRecord, TradeType};

/// Identifies one outstanding request. Strictly increasing per session.
pub type Ticket = u64;

/// Where the session is in the search → select → analyze lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Unlocked, nothing outstanding.
    Idle,
    /// Unlocked, waiting on the search issued with `ticket`.
    Searching { keyword: String, ticket: Ticket },
    /// Locked onto `complex`, waiting on its analysis.
    Analyzing { complex: Candidate, ticket: Ticket },
    /// Locked onto `complex`, analysis settled (stored or failed).
    Locked { complex: Candidate },
}

impl Phase {
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Analyzing { .. } | Self::Locked { .. })
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Searching { .. } | Self::Analyzing { .. })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching { .. } => "searching",
            Self::Analyzing { .. } => "analyzing",
            Self::Locked { .. } => "locked",
        }
    }
}

/// A search the caller must now perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub keyword: String,
}

/// An analysis fetch the caller must now perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub ticket: Ticket,
    pub complex_id: String,
    pub trade_type: TradeType,
}

/// State of one urgent-sales screen.
///
/// The session performs no I/O. Transitions that need the network hand back
/// a request tagged with a [`Ticket`]; completions are fed back through
/// [`on_search_response`](Self::on_search_response) and
/// [`on_analysis_response`](Self::on_analysis_response), which drop anything
/// whose ticket no longer matches the current phase. That makes the latest
/// request win no matter in which order responses arrive.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    query: String,
    candidates: Vec<Candidate>,
    analysis: Option<Arc<AnalysisResult>>,
    area_filter: AreaFilter,
    error: Option<String>,
    trade_type: TradeType,
    last_ticket: Ticket,
    /// Keyword of the last search issued since the list was last reset.
    searched: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TradeType::default())
    }
}

impl Session {
    pub const fn new(trade_type: TradeType) -> Self {
        Self {
            phase: Phase::Idle,
            query: String::new(),
            candidates: Vec::new(),
            analysis: None,
            area_filter: AreaFilter::ShowAll,
            error: None,
            trade_type,
            last_ticket: 0,
            searched: None,
        }
    }

    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_deref()
    }

    pub const fn area_filter(&self) -> &AreaFilter {
        &self.area_filter
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub const fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub const fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// The complex the session is locked onto, if any.
    pub const fn selected_complex(&self) -> Option<&Candidate> {
        match &self.phase {
            Phase::Analyzing { complex, .. } | Phase::Locked { complex } => Some(complex),
            Phase::Idle | Phase::Searching { .. } => None,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// The user typed into the search field.
    ///
    /// Releases the selection lock (abandoning an analysis in flight) and
    /// clears the now stale candidate list. The displayed analysis stays
    /// until another complex is selected. Returns whether the lock was
    /// released.
    pub fn edit_query(&mut self, text: impl Into<String>) -> bool {
        self.query = text.into();

        if !self.phase.is_locked() {
            return false;
        }

        tracing::debug!(from = self.phase.name(), "selection lock released by edit");
        self.phase = Phase::Idle;
        self.candidates.clear();
        self.searched = None;
        true
    }

    /// The debounce settled on `keyword`.
    ///
    /// Returns the search to perform, or `None` when the keyword is empty,
    /// stale or the session is locked. Those cases clear the candidate list
    /// and abandon any search still outstanding. A keyword equal to the one
    /// last searched (typed away and back inside one window) issues nothing
    /// and leaves the list as it is.
    pub fn on_debounced(&mut self, keyword: String) -> Option<SearchRequest> {
        if keyword != self.query {
            tracing::trace!(%keyword, "debounced keyword no longer matches query");
            return None;
        }

        if keyword.is_empty() || self.phase.is_locked() {
            self.candidates.clear();
            self.searched = None;
            if matches!(self.phase, Phase::Searching { .. }) {
                self.phase = Phase::Idle;
            }
            return None;
        }

        if self.searched.as_deref() == Some(keyword.as_str()) {
            tracing::trace!(%keyword, "keyword unchanged since last search");
            return None;
        }

        self.searched = Some(keyword.clone());
        let ticket = self.issue_ticket();
        self.error = None;
        self.phase = Phase::Searching {
            keyword: keyword.clone(),
            ticket,
        };
        tracing::debug!(ticket, %keyword, "search issued");

        Some(SearchRequest { ticket, keyword })
    }

    /// Apply a search completion. Returns `false` when it was stale.
    pub fn on_search_response(
        &mut self,
        ticket: Ticket,
        response: Result<Vec<Candidate>, ApiError>,
    ) -> bool {
        match &self.phase {
            Phase::Searching { ticket: current, .. } if *current == ticket => {}
            _ => {
                tracing::debug!(ticket, phase = self.phase.name(), "dropping stale search response");
                return false;
            }
        }

        self.phase = Phase::Idle;
        match response {
            Ok(candidates) => {
                tracing::debug!(ticket, count = candidates.len(), "search completed");
                self.candidates = candidates;
            }
            Err(err) => {
                tracing::warn!(ticket, error = %err, "search failed");
                self.candidates.clear();
                // Let the same keyword be retried.
                self.searched = None;
                self.error = Some(err.user_message(ApiOperation::Search));
            }
        }
        true
    }

    /// Lock onto the candidate at `index` of the current list.
    pub fn select_candidate(&mut self, index: usize) -> Option<AnalysisRequest> {
        let complex = self.candidates.get(index)?.clone();
        Some(self.select(complex))
    }

    /// Lock onto `complex` and start its analysis.
    ///
    /// Also the retry path: selecting the same complex again issues a fresh
    /// request and orphans the previous one.
    pub fn select(&mut self, complex: Candidate) -> AnalysisRequest {
        let ticket = self.issue_ticket();

        self.query.clone_from(&complex.name);
        self.candidates.clear();
        self.searched = None;
        self.error = None;
        self.analysis = None;

        let request = AnalysisRequest {
            ticket,
            complex_id: complex.id.clone(),
            trade_type: self.trade_type,
        };
        tracing::info!(ticket, id = %complex.id, name = %complex.name, "complex selected");
        self.phase = Phase::Analyzing { complex, ticket };

        request
    }

    /// Apply an analysis completion. Returns `false` when it was stale.
    pub fn on_analysis_response(
        &mut self,
        ticket: Ticket,
        response: Result<AnalysisResult, ApiError>,
    ) -> bool {
        let complex = match &self.phase {
            Phase::Analyzing {
                complex,
                ticket: current,
            } if *current == ticket => complex.clone(),
            _ => {
                tracing::debug!(ticket, phase = self.phase.name(), "dropping stale analysis response");
                return false;
            }
        };

        match response {
            Ok(result) => {
                tracing::info!(
                    ticket,
                    sales = result.all_sales.len(),
                    bargains = result.bargains.len(),
                    "analysis loaded"
                );
                self.analysis = Some(Arc::new(result));
                self.area_filter = AreaFilter::ShowAll;
            }
            Err(err) => {
                tracing::warn!(ticket, error = %err, "analysis failed");
                self.error = Some(err.user_message(ApiOperation::Analysis));
            }
        }
        self.phase = Phase::Locked { complex };
        true
    }

    /// Distinct area groups of the current analysis, sorted by size.
    pub fn available_areas(&self) -> Vec<String> {
        self.analysis().map(analysis::available_areas).unwrap_or_default()
    }

    /// Sales of the current analysis visible under the area filter.
    pub fn filtered_sales(&self) -> Vec<&SaleRecord> {
        self.analysis()
            .map(|result| analysis::filtered_sales(result, &self.area_filter))
            .unwrap_or_default()
    }

    /// Switch the area filter. Rejects groups the current analysis does not
    /// contain.
    pub fn set_area_filter(&mut self, filter: AreaFilter) -> bool {
        let valid = match self.analysis() {
            Some(result) => analysis::is_valid_filter(result, &filter),
            None => filter == AreaFilter::ShowAll,
        };

        if valid {
            self.area_filter = filter;
        }
        valid
    }

    /// Step through "show all" and the sorted groups, wrapping around.
    pub fn cycle_area_filter(&mut self, forward: bool) {
        let Some(result) = self.analysis() else {
            return;
        };

        let options = analysis::filter_options(result);
        let current = options
            .iter()
            .position(|option| option == &self.area_filter)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };

        self.area_filter = options[next].clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: Some("not found".into()),
        }
    }

    fn sale(group: &str) -> SaleRecord {
        SaleRecord {
            area_group: group.to_string(),
            ..SaleRecord::default()
        }
    }

    fn payload(groups: &[&str]) -> AnalysisResult {
        AnalysisResult {
            all_sales: groups.iter().map(|g| sale(g)).collect(),
            ..AnalysisResult::default()
        }
    }

    fn search(session: &mut Session, keyword: &str) -> SearchRequest {
        session.edit_query(keyword);
        session.on_debounced(keyword.to_string()).unwrap()
    }

    fn loaded(groups: &[&str]) -> Session {
        let mut session = Session::default();
        let request = session.select(Candidate::new("1", "래미안1"));
        assert!(session.on_analysis_response(request.ticket, Ok(payload(groups))));
        session
    }

    #[test]
    fn starts_idle_and_unlocked() {
        let session = Session::default();

        assert_eq!(session.phase(), &Phase::Idle);
        assert!(!session.is_locked());
        assert!(!session.is_loading());
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn empty_keyword_clears_without_request() {
        let mut session = Session::default();
        let request = search(&mut session, "래미안");
        session.on_search_response(request.ticket, Ok(vec![Candidate::new("1", "래미안1")]));

        session.edit_query("");
        assert_eq!(session.on_debounced(String::new()), None);
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn empty_keyword_abandons_outstanding_search() {
        let mut session = Session::default();
        let request = search(&mut session, "래미안");

        session.edit_query("");
        assert_eq!(session.on_debounced(String::new()), None);
        assert!(!session.is_loading());

        assert!(!session.on_search_response(request.ticket, Ok(vec![Candidate::new("1", "x")])));
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn successful_search_replaces_candidates() {
        let mut session = Session::default();

        let first = search(&mut session, "래미");
        session.on_search_response(first.ticket, Ok(vec![Candidate::new("9", "래미 old")]));
        let second = search(&mut session, "래미안");
        assert!(session.is_loading());
        session.on_search_response(
            second.ticket,
            Ok(vec![Candidate::new("1", "래미안1"), Candidate::new("2", "래미안2")]),
        );

        assert!(!session.is_loading());
        assert_eq!(
            session.candidates(),
            &[Candidate::new("1", "래미안1"), Candidate::new("2", "래미안2")]
        );
    }

    #[test]
    fn failed_search_clears_and_reports() {
        let mut session = Session::default();
        let first = search(&mut session, "a");
        session.on_search_response(first.ticket, Ok(vec![Candidate::new("1", "a1")]));

        let second = search(&mut session, "ab");
        session.on_search_response(
            second.ticket,
            Err(ApiError::Status {
                status: 400,
                message: None,
            }),
        );

        assert!(session.candidates().is_empty());
        assert_eq!(session.error(), Some("검색에 실패했습니다."));
        assert!(!session.is_loading());
    }

    #[test]
    fn older_response_arriving_last_is_ignored() {
        let mut session = Session::default();
        let k1 = search(&mut session, "K1");
        let k2 = search(&mut session, "K2");

        assert!(session.on_search_response(k2.ticket, Ok(vec![Candidate::new("2", "K2 result")])));
        assert!(!session.on_search_response(k1.ticket, Ok(vec![Candidate::new("1", "K1 result")])));

        assert_eq!(session.candidates(), &[Candidate::new("2", "K2 result")]);
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_response_cannot_end_loading_early() {
        let mut session = Session::default();
        let k1 = search(&mut session, "K1");
        let _k2 = search(&mut session, "K2");

        session.on_search_response(k1.ticket, Ok(vec![]));
        assert!(session.is_loading());
    }

    #[test]
    fn selecting_locks_and_requests_analysis_once() {
        let mut session = Session::default();
        let request = search(&mut session, "래미안");
        session.on_search_response(
            request.ticket,
            Ok(vec![Candidate::new("1", "래미안1"), Candidate::new("2", "래미안2")]),
        );

        let analysis = session.select_candidate(0).unwrap();

        assert_eq!(analysis.complex_id, "1");
        assert_eq!(analysis.trade_type, TradeType::Sale);
        assert_eq!(session.query(), "래미안1");
        assert!(session.candidates().is_empty());
        assert!(session.is_locked());
        assert!(session.is_loading());
        assert_eq!(session.selected_complex(), Some(&Candidate::new("1", "래미안1")));
    }

    #[test]
    fn select_out_of_range_does_nothing() {
        let mut session = Session::default();
        assert_eq!(session.select_candidate(3), None);
        assert!(!session.is_locked());
    }

    #[test]
    fn locked_session_issues_no_search() {
        let mut session = loaded(&["59A"]);

        // The name written into the query by the selection debounces too.
        assert_eq!(session.on_debounced("래미안1".to_string()), None);
        assert!(session.is_locked());
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn edit_releases_lock_and_next_debounce_searches() {
        let mut session = loaded(&["59A"]);

        assert!(session.edit_query("래미안"));
        assert!(!session.is_locked());
        assert!(session.on_debounced("래미안".to_string()).is_some());
    }

    #[test]
    fn unchanged_keyword_is_not_searched_again() {
        let mut session = Session::default();
        let request = search(&mut session, "a");
        session.on_search_response(request.ticket, Ok(vec![Candidate::new("1", "a1")]));

        // "ab" then backspace inside one window settles on "a" again.
        session.edit_query("ab");
        session.edit_query("a");
        assert_eq!(session.on_debounced("a".to_string()), None);
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.candidates(), &[Candidate::new("1", "a1")]);
    }

    #[test]
    fn unchanged_keyword_keeps_outstanding_search() {
        let mut session = Session::default();
        let request = search(&mut session, "a");

        assert_eq!(session.on_debounced("a".to_string()), None);
        assert!(session.is_loading());
        assert!(session.on_search_response(request.ticket, Ok(vec![Candidate::new("1", "a1")])));
    }

    #[test]
    fn keyword_is_searched_again_after_reset() {
        let mut session = Session::default();
        let request = search(&mut session, "a");
        session.on_search_response(request.ticket, Ok(vec![]));

        session.edit_query("");
        assert_eq!(session.on_debounced(String::new()), None);
        assert!(search(&mut session, "a").ticket > request.ticket);

        session.select(Candidate::new("1", "a1"));
        session.edit_query("a");
        assert!(session.on_debounced("a".to_string()).is_some());
    }

    #[test]
    fn failed_keyword_can_be_retried() {
        let mut session = Session::default();
        let request = search(&mut session, "a");
        session.on_search_response(request.ticket, Err(not_found()));

        assert!(session.on_debounced("a".to_string()).is_some());
    }

    #[test]
    fn search_in_flight_at_selection_is_discarded() {
        let mut session = Session::default();
        let request = search(&mut session, "래미안");
        session.select(Candidate::new("1", "래미안1"));

        assert!(!session.on_search_response(request.ticket, Ok(vec![Candidate::new("2", "x")])));
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn edit_while_analyzing_orphans_the_analysis() {
        let mut session = Session::default();
        let request = session.select(Candidate::new("1", "래미안1"));

        session.edit_query("래미안");
        assert!(!session.on_analysis_response(request.ticket, Ok(payload(&["59A"]))));
        assert!(session.analysis().is_none());
        assert!(!session.is_locked());
    }

    #[test]
    fn reselect_orphans_previous_analysis() {
        let mut session = Session::default();
        let first = session.select(Candidate::new("1", "A"));
        let second = session.select(Candidate::new("2", "B"));

        assert!(!session.on_analysis_response(first.ticket, Ok(payload(&["59A"]))));
        assert!(session.on_analysis_response(second.ticket, Ok(payload(&["84B"]))));
        assert_eq!(session.available_areas(), vec!["84B"]);
    }

    #[test]
    fn failed_analysis_reports_and_leaves_no_stale_data() {
        let mut session = loaded(&["59A", "84B"]);
        session.set_area_filter(AreaFilter::Group("84B".into()));

        let request = session.select(Candidate::new("2", "래미안2"));
        assert!(session.on_analysis_response(request.ticket, Err(not_found())));

        assert_eq!(session.error(), Some("not found"));
        assert!(session.analysis().is_none());
        assert!(session.filtered_sales().is_empty());
        assert!(!session.is_loading());
        assert!(session.is_locked());
        // A failed fetch leaves the filter untouched.
        assert_eq!(session.area_filter(), &AreaFilter::Group("84B".into()));
    }

    #[test]
    fn successful_analysis_resets_filter() {
        let mut session = loaded(&["59A", "84B"]);
        session.set_area_filter(AreaFilter::Group("84B".into()));

        let request = session.select(Candidate::new("1", "래미안1"));
        session.on_analysis_response(request.ticket, Ok(payload(&["84B"])));

        assert_eq!(session.area_filter(), &AreaFilter::ShowAll);
    }

    #[test]
    fn new_search_clears_previous_error() {
        let mut session = Session::default();
        let request = session.select(Candidate::new("1", "A"));
        session.on_analysis_response(request.ticket, Err(not_found()));

        session.edit_query("B");
        session.on_debounced("B".to_string());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn filter_rejects_groups_outside_payload() {
        let mut session = loaded(&["59A", "84B"]);

        assert!(!session.set_area_filter(AreaFilter::Group("114C".into())));
        assert_eq!(session.area_filter(), &AreaFilter::ShowAll);
        assert!(session.set_area_filter(AreaFilter::Group("59A".into())));
    }

    #[test]
    fn filter_toggle_is_idempotent() {
        let mut session = loaded(&["59A", "84B", "84B"]);

        session.set_area_filter(AreaFilter::Group("84B".into()));
        let first: Vec<SaleRecord> = session.filtered_sales().into_iter().cloned().collect();
        session.set_area_filter(AreaFilter::ShowAll);
        assert_eq!(session.filtered_sales().len(), 3);
        session.set_area_filter(AreaFilter::Group("84B".into()));
        let second: Vec<SaleRecord> = session.filtered_sales().into_iter().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn cycling_walks_sorted_options_and_wraps() {
        let mut session = loaded(&["84B", "59A"]);

        session.cycle_area_filter(true);
        assert_eq!(session.area_filter(), &AreaFilter::Group("59A".into()));
        session.cycle_area_filter(true);
        assert_eq!(session.area_filter(), &AreaFilter::Group("84B".into()));
        session.cycle_area_filter(true);
        assert_eq!(session.area_filter(), &AreaFilter::ShowAll);
        session.cycle_area_filter(false);
        assert_eq!(session.area_filter(), &AreaFilter::Group("84B".into()));
    }
}
