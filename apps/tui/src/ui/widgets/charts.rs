use crate::domain::AnalysisResult;
use crate::ui::widgets::tables::format_eok;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub const CHART_TABS: [&str; 2] = ["평균 가격", "매물 수"];

/// Bar colors, picked by ordinal position and wrapping past the sixth.
pub const AREA_PALETTE: [Color; 6] = [
    Color::Rgb(0x00, 0x88, 0xFE),
    Color::Rgb(0x00, 0xC4, 0x9F),
    Color::Rgb(0xFF, 0xBB, 0x28),
    Color::Rgb(0xFF, 0x80, 0x42),
    Color::Rgb(0x88, 0x84, 0xD8),
    Color::Rgb(0x82, 0xCA, 0x9D),
];

pub const fn area_color(index: usize) -> Color {
    AREA_PALETTE[index % AREA_PALETTE.len()]
}

pub fn render_chart_tabs(selected: usize, focused: bool, f: &mut Frame<'_>, area: Rect) {
    let titles = CHART_TABS
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let highlight = if focused { Color::Yellow } else { Color::Cyan };
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(highlight).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

pub fn render_chart_panel(
    analysis: &AnalysisResult,
    tab_index: usize,
    focused: bool,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let border_color = if focused { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .title(format!(" {} ", CHART_TABS[tab_index % CHART_TABS.len()]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if tab_index % CHART_TABS.len() == 0 {
        render_mean_price_chart(analysis, block, f, area);
    } else {
        render_count_chart(analysis, block, f, area);
    }
}

fn render_empty(block: Block<'_>, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new("데이터가 없습니다.")
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_mean_price_chart(analysis: &AnalysisResult, block: Block<'_>, f: &mut Frame<'_>, area: Rect) {
    if analysis.mean_prices.is_empty() {
        render_empty(block, f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = analysis
        .mean_prices
        .iter()
        .enumerate()
        .map(|(index, row)| {
            Bar::default()
                .value(bar_height(row.price_num))
                .text_value(format_eok(row.price_num, 1))
                .label(TextLine::from(row.area_name.clone()))
                .style(Style::default().fg(area_color(index)))
                .value_style(Style::default().fg(Color::Black).bg(area_color(index)))
        })
        .collect();

    let inner = block.inner(area);
    f.render_widget(block, area);

    let [chart_area, detail_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner);

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(7);
    f.render_widget(chart, chart_area);

    let detail = Paragraph::new(mean_price_details(analysis))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, detail_area);
}

fn render_count_chart(analysis: &AnalysisResult, block: Block<'_>, f: &mut Frame<'_>, area: Rect) {
    if analysis.count_by_area.is_empty() {
        render_empty(block, f, area);
        return;
    }

    let bars: Vec<Bar<'_>> = analysis
        .count_by_area
        .iter()
        .enumerate()
        .map(|(index, row)| {
            Bar::default()
                .value(row.count)
                .label(TextLine::from(row.area_name.clone()))
                .style(Style::default().fg(area_color(index)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(area_color(index))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = analysis
        .count_by_area
        .iter()
        .map(|row| row.count)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(6);

    f.render_widget(chart, area);
}

/// Bars are scaled in 만원; negative or NaN prices draw as empty bars.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_height(price_man: f64) -> u64 {
    if price_man.is_finite() && price_man > 0.0 {
        price_man.round() as u64
    } else {
        0
    }
}

/// One `area: price` entry per bar, with two decimals.
pub fn mean_price_details(analysis: &AnalysisResult) -> String {
    analysis
        .mean_prices
        .iter()
        .map(|row| format!("{}: {}", row.area_name, format_eok(row.price_num, 2)))
        .collect::<Vec<_>>()
        .join("  ")
}
