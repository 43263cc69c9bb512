#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use urgent_sales_tui::api::fake::FakeApi;
use urgent_sales_tui::api::ListingApi;
use urgent_sales_tui::app::App;
use urgent_sales_tui::config::AppConfig;
use urgent_sales_tui::domain::{Candidate, SaleRecord};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn candidates(entries: &[(&str, &str)]) -> Vec<Candidate> {
    entries
        .iter()
        .map(|(id, name)| Candidate::new(*id, *name))
        .collect()
}

pub fn sale(no: &str, group: &str) -> SaleRecord {
    SaleRecord {
        article_no: no.to_string(),
        area_group: group.to_string(),
        ..SaleRecord::default()
    }
}

pub fn app(api: &Arc<FakeApi>) -> App {
    let api: Arc<dyn ListingApi> = Arc::clone(api) as Arc<dyn ListingApi>;
    App::new(api, &AppConfig::default())
}

pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        app.type_char(c);
    }
}

/// Apply completions until the app has been quiet for a while.
pub async fn settle(app: &mut App) {
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_secs(5), app.next_event()).await
    {
        app.handle_event(event);
    }
}
