// Rendering for the urgent-sales screen and its popups

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::urgent_sales::render_urgent_sales(app, f);

    if let Some(detail) = &app.detail {
        screens::sale_details::render_sale_details(detail, f);
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ListingApi};
    use crate::app::{Focus, SaleDetail};
    use crate::config::AppConfig;
    use crate::domain::{
        AnalysisResult, AreaCountRow, BargainRecord, Candidate, MeanPriceRow, SaleRecord,
        TradeType,
    };
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    struct OfflineApi;

    #[async_trait]
    impl ListingApi for OfflineApi {
        async fn search_complexes(&self, _keyword: &str) -> Result<Vec<Candidate>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_analysis(
            &self,
            _complex_id: &str,
            _trade_type: TradeType,
        ) -> Result<AnalysisResult, ApiError> {
            Ok(AnalysisResult::default())
        }
    }

    fn app() -> App {
        App::new(Arc::new(OfflineApi), &AppConfig::default())
    }

    fn sale(building: &str, group: &str) -> SaleRecord {
        SaleRecord {
            article_name: "Raemian".to_string(),
            building_name: building.to_string(),
            floor_info: "7/20".to_string(),
            deal_or_warrant_prc: "10.5".to_string(),
            area_name: format!("{group}m2"),
            area_group: group.to_string(),
            direction: "S".to_string(),
            article_confirm_ymd: "20240105".to_string(),
            price_num: Some(105_000.0),
            ..SaleRecord::default()
        }
    }

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            all_sales: vec![sale("B101", "84A"), sale("B102", "59B")],
            mean_prices: vec![MeanPriceRow {
                area_name: "84A".to_string(),
                price_num: 123_000.0,
            }],
            count_by_area: vec![AreaCountRow {
                area_name: "84A".to_string(),
                count: 3,
            }],
            bargains: vec![BargainRecord {
                sale: sale("B777", "84A"),
                discount_pct: Some(12.34),
            }],
        }
    }

    fn lock_with_analysis(app: &mut App, result: AnalysisResult) {
        let request = app.session.select(Candidate::new("1", "Raemian"));
        assert!(app.session.on_analysis_response(request.ticket, Ok(result)));
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_screen_renders_title() {
        let screen = draw(&app(), 100, 30);
        assert!(screen.contains("Urgent Sales"));
    }

    #[test]
    fn analysis_renders_tables_and_discount() {
        let mut app = app();
        lock_with_analysis(&mut app, analysis());
        app.focus = Focus::Sales;

        let screen = draw(&app, 140, 40);

        assert!(screen.contains("B101"));
        assert!(screen.contains("B102"));
        assert!(screen.contains("B777"));
        assert!(screen.contains("12.3%"));
        assert!(screen.contains("59B"));
    }

    #[test]
    fn area_filter_hides_other_groups() {
        let mut app = app();
        lock_with_analysis(&mut app, analysis());
        app.session.cycle_area_filter(true);

        let screen = draw(&app, 140, 40);

        assert!(!screen.contains("B101"));
        assert!(screen.contains("B102"));
    }

    #[test]
    fn dropdown_lists_candidates() {
        let mut app = app();
        app.session.edit_query("rae");
        let request = app.session.on_debounced("rae".to_string()).unwrap();
        app.session.on_search_response(
            request.ticket,
            Ok(vec![
                Candidate::new("1", "Raemian One"),
                Candidate::new("2", "Raemian Two"),
            ]),
        );

        let screen = draw(&app, 100, 30);

        assert!(screen.contains("Raemian One"));
        assert!(screen.contains("Raemian Two"));
    }

    #[test]
    fn popups_fit_tiny_terminals() {
        let mut app = app();
        lock_with_analysis(&mut app, analysis());
        app.detail = Some(SaleDetail::from(&analysis().bargains[0]));
        app.show_help = true;

        draw(&app, 20, 6);
        draw(&app, 3, 2);
    }

    #[test]
    fn detail_modal_shows_record() {
        let mut app = app();
        lock_with_analysis(&mut app, analysis());
        app.detail = Some(SaleDetail::from(&analysis().bargains[0]));

        let screen = draw(&app, 120, 40);

        assert!(screen.contains("B777"));
        assert!(screen.contains("12.3%"));
    }
}
