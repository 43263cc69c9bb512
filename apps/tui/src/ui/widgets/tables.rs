use crate::domain::{BargainRecord, SaleRecord};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub const SALE_HEADERS: [&str; 6] = ["동", "층", "가격", "평형", "방향", "확인일"];
pub const BARGAIN_HEADERS: [&str; 7] = ["동", "층", "가격", "할인율", "평형", "방향", "확인일"];

const SALE_WIDTHS: [Constraint; 6] = [
    Constraint::Length(8),
    Constraint::Length(8),
    Constraint::Min(12),
    Constraint::Length(8),
    Constraint::Length(6),
    Constraint::Length(10),
];

const BARGAIN_WIDTHS: [Constraint; 7] = [
    Constraint::Length(8),
    Constraint::Length(8),
    Constraint::Min(12),
    Constraint::Length(7),
    Constraint::Length(8),
    Constraint::Length(6),
    Constraint::Length(10),
];

pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// Prices arrive in 만원; 1억 is 10,000 of them.
pub fn format_eok(price_man: f64, decimals: usize) -> String {
    format!("{:.*}억", decimals, price_man / 10_000.0)
}

pub fn format_discount(discount_pct: Option<f64>) -> String {
    discount_pct.map_or_else(|| "-".to_string(), |pct| format!("{pct:.1}%"))
}

pub fn sale_cells(sale: &SaleRecord) -> Vec<String> {
    vec![
        sale.building_name.clone(),
        sale.floor_info.clone(),
        sale.deal_or_warrant_prc.clone(),
        sale.area_name.clone(),
        sale.direction.clone(),
        sale.article_confirm_ymd.clone(),
    ]
}

/// Sale columns with the discount inserted right after the price.
pub fn bargain_cells(bargain: &BargainRecord) -> Vec<String> {
    let mut cells = sale_cells(&bargain.sale);
    cells.insert(3, format_discount(bargain.discount_pct));
    cells
}

pub struct RecordTable<'a> {
    pub title: String,
    pub headers: &'a [&'a str],
    pub widths: &'a [Constraint],
    pub rows: Vec<Vec<String>>,
    pub selected_index: usize,
    pub focused: bool,
    pub empty_text: &'a str,
}

impl<'a> RecordTable<'a> {
    pub fn sales(title: String, sales: &[&SaleRecord], selected_index: usize, focused: bool) -> Self {
        Self {
            title,
            headers: &SALE_HEADERS,
            widths: &SALE_WIDTHS,
            rows: sales.iter().map(|sale| sale_cells(sale)).collect(),
            selected_index,
            focused,
            empty_text: "해당 평형의 매물이 없습니다.",
        }
    }

    pub fn bargains(bargains: &[BargainRecord], selected_index: usize, focused: bool) -> Self {
        Self {
            title: format!(" 급매 ({}) ", bargains.len()),
            headers: &BARGAIN_HEADERS,
            widths: &BARGAIN_WIDTHS,
            rows: bargains.iter().map(bargain_cells).collect(),
            selected_index,
            focused,
            empty_text: "급매 물건이 없습니다.",
        }
    }

    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let border_color = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        if self.rows.is_empty() {
            let paragraph = Paragraph::new(self.empty_text)
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(self.headers.iter().map(|title| Cell::from(*title))).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let total_rows = self.rows.len();
        let max_visible_rows = area.height.saturating_sub(3) as usize;
        let offset = scroll_offset(total_rows, max_visible_rows, self.selected_index);
        let selected_index = self.selected_index;
        let focused = self.focused;

        let rows = self
            .rows
            .into_iter()
            .enumerate()
            .skip(offset)
            .take(max_visible_rows)
            .map(|(index, cells)| {
                let style = if focused && index == selected_index {
                    Style::default()
                        .bg(Color::Rgb(0, 0, 238))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(cells.into_iter().map(Cell::from)).style(style)
            });

        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .block(block)
            .column_spacing(1);

        f.render_widget(table, area);
    }
}
