use crate::app::SaleDetail;
use crate::ui::widgets::popup::centered_fixed;
use crate::ui::widgets::tables::{format_discount, format_eok};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

fn detail_line(label: &str, value: String) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label:<8}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn detail_lines(detail: &SaleDetail) -> Vec<TextLine<'static>> {
    let sale = &detail.sale;

    let mut lines = vec![
        TextLine::from(Span::styled(
            or_dash(&sale.article_name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        detail_line("매물번호", or_dash(&sale.article_no)),
        detail_line("동", or_dash(&sale.building_name)),
        detail_line("층", or_dash(&sale.floor_info)),
        detail_line("가격", or_dash(&sale.deal_or_warrant_prc)),
    ];

    if let Some(price) = sale.price_num {
        lines.push(detail_line("환산가", format_eok(price, 2)));
    }
    if detail.discount_pct.is_some() {
        lines.push(detail_line("할인율", format_discount(detail.discount_pct)));
    }

    lines.extend([
        detail_line("면적", or_dash(&sale.area_name)),
        detail_line("평형", or_dash(&sale.area_group)),
        detail_line("방향", or_dash(&sale.direction)),
        detail_line("확인일", or_dash(&sale.article_confirm_ymd)),
        detail_line("중개사", or_dash(&sale.realtor_name)),
    ]);

    if !sale.tag_list.is_empty() {
        lines.push(detail_line("태그", sale.tag_list.join(", ")));
    }

    if !sale.article_feature_desc.trim().is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(sale.article_feature_desc.clone()));
    }

    lines
}

pub fn render_sale_details(detail: &SaleDetail, f: &mut Frame<'_>) {
    let popup_area = centered_fixed(64, 20, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" 매물 상세 ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let [body, hint] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let paragraph = Paragraph::new(Text::from(detail_lines(detail))).wrap(Wrap { trim: true });
    f.render_widget(paragraph, body);

    let hint_line = Paragraph::new(Span::styled(
        "Esc / Enter 닫기",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hint_line, hint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BargainRecord, SaleRecord};

    fn line_text(line: &TextLine<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn bargain_detail_shows_discount_and_precise_price() {
        let bargain = BargainRecord {
            sale: SaleRecord {
                article_name: "Raemian".to_string(),
                price_num: Some(123_456.0),
                tag_list: vec!["역세권".to_string(), "급매".to_string()],
                ..SaleRecord::default()
            },
            discount_pct: Some(8.26),
        };

        let lines: Vec<String> = detail_lines(&SaleDetail::from(&bargain))
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(lines[0], "Raemian");
        assert!(lines.iter().any(|line| line.ends_with("12.35억")));
        assert!(lines.iter().any(|line| line.ends_with("8.3%")));
        assert!(lines.iter().any(|line| line.ends_with("역세권, 급매")));
    }

    #[test]
    fn sale_detail_has_no_discount_row() {
        let sale = SaleRecord::default();
        let lines: Vec<String> = detail_lines(&SaleDetail::from(&sale))
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(lines[0], "-");
        assert!(!lines.iter().any(|line| line.starts_with("할인율")));
    }
}
