use crate::api::ListingApi;
use crate::app::actions::AppActions;
use crate::config::AppConfig;
use crate::domain::{BargainRecord, SaleRecord};
use crate::event::AppEvent;
use crate::search::Session;
use std::sync::Arc;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Sales,
    Bargains,
    Charts,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Query => Self::Sales,
            Self::Sales => Self::Bargains,
            Self::Bargains => Self::Charts,
            Self::Charts => Self::Query,
        }
    }
}

/// Record shown in the read-only detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDetail {
    pub sale: SaleRecord,
    pub discount_pct: Option<f64>,
}

impl From<&SaleRecord> for SaleDetail {
    fn from(sale: &SaleRecord) -> Self {
        Self {
            sale: sale.clone(),
            discount_pct: None,
        }
    }
}

impl From<&BargainRecord> for SaleDetail {
    fn from(bargain: &BargainRecord) -> Self {
        Self {
            sale: bargain.sale.clone(),
            discount_pct: bargain.discount_pct,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub session: Session,
    pub actions: AppActions,
    events: UnboundedReceiver<AppEvent>,
    pub focus: Focus,
    pub candidate_index: usize,
    pub selected_sale_index: usize,
    pub selected_bargain_index: usize,
    pub chart_tab_index: usize,
    pub detail: Option<SaleDetail>,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber_state: ThrobberState,
    pub api_base_url: String,
}

impl App {
    pub fn new(api: Arc<dyn ListingApi>, config: &AppConfig) -> Self {
        let (tx, events) = mpsc::unbounded_channel();

        Self {
            running: true,
            session: Session::new(config.trade_type),
            actions: AppActions::new(api, config.debounce, tx),
            events,
            focus: Focus::Query,
            candidate_index: 0,
            selected_sale_index: 0,
            selected_bargain_index: 0,
            chart_tab_index: 0,
            detail: None,
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber_state: ThrobberState::default(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.session.is_loading() {
            self.throbber_state.calc_next();
        }
    }

    pub fn type_char(&mut self, c: char) {
        let mut text = self.session.query().to_string();
        text.push(c);
        self.edit_query(text);
    }

    pub fn backspace(&mut self) {
        let mut text = self.session.query().to_string();
        if text.pop().is_some() {
            self.edit_query(text);
        }
    }

    pub fn clear_query(&mut self) {
        if !self.session.query().is_empty() {
            self.edit_query(String::new());
        }
    }

    /// Route a direct edit of the search field through the session and
    /// restart the debounce.
    pub fn edit_query(&mut self, text: String) {
        self.session.edit_query(text.clone());
        self.candidate_index = 0;
        self.actions.schedule_search(text);
    }

    pub fn move_candidate(&mut self, forward: bool) {
        let len = self.session.candidates().len();
        self.candidate_index = if forward {
            crate::app::input::wrap_increment(self.candidate_index, len)
        } else {
            crate::app::input::wrap_decrement(self.candidate_index, len)
        };
    }

    /// Lock onto the highlighted candidate and fetch its analysis.
    pub fn select_highlighted_candidate(&mut self) -> bool {
        let Some(request) = self.session.select_candidate(self.candidate_index) else {
            return false;
        };

        self.actions.cancel_pending_search();
        self.actions.spawn_analysis(request);
        self.candidate_index = 0;
        self.selected_sale_index = 0;
        self.selected_bargain_index = 0;
        self.detail = None;
        true
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::QueryDebounced(fired) => {
                let Some(keyword) = self.actions.accept_debounced(fired) else {
                    return;
                };
                if let Some(request) = self.session.on_debounced(keyword) {
                    self.actions.spawn_search(request);
                }
            }
            AppEvent::SearchFinished { ticket, result } => {
                if self.session.on_search_response(ticket, result) {
                    self.candidate_index = 0;
                }
            }
            AppEvent::AnalysisFinished { ticket, result } => {
                if self.session.on_analysis_response(ticket, result) {
                    self.selected_sale_index = 0;
                    self.selected_bargain_index = 0;
                }
            }
        }
    }

    /// Apply every completion that arrived since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next completion. `None` once every sender is gone.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events.recv().await
    }

    pub fn sales_len(&self) -> usize {
        self.session.filtered_sales().len()
    }

    pub fn bargains_len(&self) -> usize {
        self.session
            .analysis()
            .map_or(0, |analysis| analysis.bargains.len())
    }

    pub fn cycle_focus(&mut self) {
        if self.session.analysis().is_none() {
            self.focus = Focus::Query;
            return;
        }
        self.focus = self.focus.next();
    }

    pub fn cycle_area_filter(&mut self, forward: bool) {
        self.session.cycle_area_filter(forward);
        self.selected_sale_index = 0;
    }

    pub fn open_sale_detail(&mut self) {
        self.detail = self
            .session
            .filtered_sales()
            .get(self.selected_sale_index)
            .map(|sale| SaleDetail::from(*sale));
    }

    pub fn open_bargain_detail(&mut self) {
        self.detail = self
            .session
            .analysis()
            .and_then(|analysis| analysis.bargains.get(self.selected_bargain_index))
            .map(SaleDetail::from);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.actions.shutdown();
    }
}
