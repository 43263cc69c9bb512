mod common;

use common::{candidates, ms, sale};
use urgent_sales_tui::api::fake::FakeApi;
use urgent_sales_tui::domain::{AnalysisResult, BargainRecord, MeanPriceRow, TradeType};
use urgent_sales_tui::event::{analysis_report, search_report};

fn analysis() -> AnalysisResult {
    AnalysisResult {
        all_sales: vec![sale("1", "84A"), sale("2", "101"), sale("3", "59B")],
        mean_prices: vec![MeanPriceRow {
            area_name: "84A".to_string(),
            price_num: 123_000.0,
        }],
        bargains: vec![BargainRecord {
            sale: sale("1", "84A"),
            discount_pct: Some(12.34),
        }],
        ..AnalysisResult::default()
    }
}

#[tokio::test]
async fn search_report_lists_candidates() {
    let api = FakeApi::new().with_search("rae", ms(0), candidates(&[("1", "Raemian")]));

    let report = search_report(&api, "rae").await.unwrap();

    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].id, "1");
}

#[tokio::test]
async fn blank_keyword_does_not_hit_the_backend() {
    let api = FakeApi::new();

    let report = search_report(&api, "").await.unwrap();

    assert!(report.candidates.is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn analysis_report_sorts_areas_and_applies_filter() {
    let api = FakeApi::new().with_analysis("42", ms(0), analysis());

    let report = analysis_report(&api, TradeType::Sale, "42", Some("84A"))
        .await
        .unwrap();

    assert_eq!(report.area_groups, ["59B", "84A", "101"]);
    assert_eq!(report.area_filter, "84A");
    assert_eq!(report.total_sales, 3);
    assert_eq!(report.sales.len(), 1);
    assert_eq!(report.mean_prices[0].display, "12.3억");
    assert_eq!(report.bargains[0].discount.as_deref(), Some("12.3%"));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["generated_at"].as_str().is_some());
    assert_eq!(json["trade_type"], "A1");
}

#[tokio::test]
async fn unknown_area_is_rejected() {
    let api = FakeApi::new().with_analysis("42", ms(0), analysis());

    let err = analysis_report(&api, TradeType::Sale, "42", Some("200"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("59B, 84A, 101"));
}

#[tokio::test]
async fn backend_error_message_surfaces() {
    let api = FakeApi::new().with_analysis_error("1", 404, Some("not found"));

    let err = analysis_report(&api, TradeType::Sale, "1", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "not found");
}
