use chrono::Local;
use color_eyre::eyre::{eyre, Result};
use serde::Serialize;

use crate::api::ListingApi;
use crate::cli::CliArgs;
use crate::domain::{AreaFilter, BargainRecord, Candidate, SaleRecord, TradeType};
use crate::search::Session;
use crate::ui::widgets::tables::{format_discount, format_eok};

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub generated_at: String,
    pub keyword: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub complex_id: String,
    pub trade_type: &'static str,
    pub area_filter: String,
    pub area_groups: Vec<String>,
    pub total_sales: usize,
    pub mean_prices: Vec<HeadlessMeanPrice>,
    pub count_by_area: Vec<(String, u64)>,
    pub sales: Vec<HeadlessSale>,
    pub bargains: Vec<HeadlessSale>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessMeanPrice {
    pub area: String,
    pub price_num: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct HeadlessSale {
    pub article_no: String,
    pub building: String,
    pub floor: String,
    pub price: String,
    pub discount: Option<String>,
    pub area: String,
    pub area_group: String,
    pub direction: String,
    pub confirmed: String,
}

impl HeadlessSale {
    fn from_sale(sale: &SaleRecord) -> Self {
        Self {
            article_no: sale.article_no.clone(),
            building: sale.building_name.clone(),
            floor: sale.floor_info.clone(),
            price: sale.deal_or_warrant_prc.clone(),
            discount: None,
            area: sale.area_name.clone(),
            area_group: sale.area_group.clone(),
            direction: sale.direction.clone(),
            confirmed: sale.article_confirm_ymd.clone(),
        }
    }

    fn from_bargain(bargain: &BargainRecord) -> Self {
        Self {
            discount: Some(format_discount(bargain.discount_pct)),
            ..Self::from_sale(&bargain.sale)
        }
    }
}

fn timestamp() -> String {
    Local::now().to_rfc3339()
}

/// One search, driven through the same session rules as the TUI minus the
/// debounce.
pub async fn search_report(api: &dyn ListingApi, keyword: &str) -> Result<SearchReport> {
    let mut session = Session::default();
    session.edit_query(keyword);

    if let Some(request) = session.on_debounced(keyword.to_string()) {
        let result = api.search_complexes(&request.keyword).await;
        session.on_search_response(request.ticket, result);
    }

    if let Some(message) = session.error() {
        return Err(eyre!("{message}"));
    }

    Ok(SearchReport {
        generated_at: timestamp(),
        keyword: keyword.to_string(),
        candidates: session.candidates().to_vec(),
    })
}

/// Fetch and summarize one complex, optionally narrowed to an area group.
pub async fn analysis_report(
    api: &dyn ListingApi,
    trade_type: TradeType,
    complex_id: &str,
    area: Option<&str>,
) -> Result<AnalysisReport> {
    let mut session = Session::new(trade_type);
    let request = session.select(Candidate::new(complex_id, complex_id));
    let result = api
        .fetch_analysis(&request.complex_id, request.trade_type)
        .await;
    session.on_analysis_response(request.ticket, result);

    if let Some(message) = session.error() {
        return Err(eyre!("{message}"));
    }

    if let Some(group) = area {
        if !session.set_area_filter(AreaFilter::Group(group.to_string())) {
            return Err(eyre!(
                "Unknown area group {group:?}; available: {}",
                session.available_areas().join(", ")
            ));
        }
    }

    let Some(analysis) = session.analysis() else {
        return Err(eyre!("No analysis was stored for complex {complex_id}"));
    };

    Ok(AnalysisReport {
        generated_at: timestamp(),
        complex_id: complex_id.to_string(),
        trade_type: trade_type.as_code(),
        area_filter: session.area_filter().label().to_string(),
        area_groups: session.available_areas(),
        total_sales: analysis.all_sales.len(),
        mean_prices: analysis
            .mean_prices
            .iter()
            .map(|row| HeadlessMeanPrice {
                area: row.area_name.clone(),
                price_num: row.price_num,
                display: format_eok(row.price_num, 1),
            })
            .collect(),
        count_by_area: analysis
            .count_by_area
            .iter()
            .map(|row| (row.area_name.clone(), row.count))
            .collect(),
        sales: session
            .filtered_sales()
            .into_iter()
            .map(HeadlessSale::from_sale)
            .collect(),
        bargains: analysis
            .bargains
            .iter()
            .map(HeadlessSale::from_bargain)
            .collect(),
    })
}

fn print_search_report(report: &SearchReport) {
    println!("\nComplexes matching {:?}", report.keyword);
    println!("=========================");
    if report.candidates.is_empty() {
        println!("(none)");
    }
    for candidate in &report.candidates {
        println!("- {} | {}", candidate.id, candidate.name);
    }
}

fn print_sale_rows(rows: &[HeadlessSale]) {
    for row in rows {
        let discount = row
            .discount
            .as_deref()
            .map_or_else(String::new, |discount| format!(" | {discount}"));
        println!(
            "- {} | {} | {}{} | {} | {} | {}",
            row.building, row.floor, row.price, discount, row.area, row.direction, row.confirmed
        );
    }
}

fn print_analysis_report(report: &AnalysisReport) {
    println!("\nUrgent Sales for complex {}", report.complex_id);
    println!("=========================");
    println!("Trade type: {}", report.trade_type);
    println!("Total sales: {}", report.total_sales);
    println!("Area groups: {}", report.area_groups.join(", "));
    println!("Filter: {}", report.area_filter);

    println!("\nMean price by area:");
    for row in &report.mean_prices {
        println!("- {}: {}", row.area, row.display);
    }

    println!("\nListings by area:");
    for (area, count) in &report.count_by_area {
        println!("- {area}: {count}");
    }

    println!("\nSales ({}):", report.sales.len());
    print_sale_rows(&report.sales);

    println!("\nBargains ({}):", report.bargains.len());
    print_sale_rows(&report.bargains);
}

/// Run the application in headless mode (no UI).
pub async fn run_headless(
    api: &dyn ListingApi,
    trade_type: TradeType,
    args: &CliArgs,
) -> Result<()> {
    if let Some(keyword) = &args.keyword {
        let report = search_report(api, keyword).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_search_report(&report);
        }
        return Ok(());
    }

    if let Some(complex_id) = &args.complex_id {
        let report = analysis_report(api, trade_type, complex_id, args.area.as_deref()).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_analysis_report(&report);
        }
        return Ok(());
    }

    println!("{}", CliArgs::help_text());
    Ok(())
}
