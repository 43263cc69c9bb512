use crate::analysis::filter_options;
use crate::app::{App, Focus};
use crate::domain::AnalysisResult;
use crate::search::Phase;
use crate::ui::widgets::charts::{render_chart_panel, render_chart_tabs};
use crate::ui::widgets::dropdown::{dropdown_height, render_candidate_dropdown};
use crate::ui::widgets::popup::below;
use crate::ui::widgets::tables::RecordTable;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_urgent_sales(app: &App, f: &mut Frame<'_>) {
    let [title_area, query_area, status_area, content_area, shortcuts_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(f.area().inner(Margin::new(1, 0)));

    render_title(app, f, title_area);
    render_query(app, f, query_area);
    render_status(app, f, status_area);

    match app.session.analysis() {
        Some(analysis) => render_analysis(app, analysis, f, content_area),
        None => render_placeholder(app, f, content_area),
    }

    render_shortcuts(app.focus, f, shortcuts_area);

    if app.focus == Focus::Query && !app.session.is_locked() {
        let candidates = app.session.candidates();
        let dropdown_area = below(
            query_area.inner(Margin::new(1, 0)),
            query_area.width.saturating_sub(2).min(60),
            dropdown_height(candidates.len()),
            f.area(),
        );
        render_candidate_dropdown(
            candidates,
            app.session.query(),
            app.candidate_index,
            f,
            dropdown_area,
        );
    }
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Urgent Sales ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", app.session.trade_type().label()),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some(complex) = app.session.selected_complex() {
        spans.push(Span::styled(
            complex.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn cursor_char(focused: bool, animation_counter: f64) -> &'static str {
    if focused && (animation_counter * 2.0).sin() > 0.0 {
        "█"
    } else {
        " "
    }
}

fn render_query(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Query;
    let border_color = if focused { Color::Green } else { Color::DarkGray };
    let lock_hint = if app.session.is_locked() { " (선택됨) " } else { "" };

    let block = Block::default()
        .title(format!(" 단지 검색{lock_hint} "))
        .title_style(Style::default().fg(border_color))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let [input_area, throbber_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(16)]).areas(inner);

    let input = Paragraph::new(TextLine::from(Span::styled(
        format!(
            "> {}{}",
            app.session.query(),
            cursor_char(focused, app.animation_counter)
        ),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(input, input_area);

    let label = match app.session.phase() {
        Phase::Searching { .. } => "검색 중",
        Phase::Analyzing { .. } => "분석 중",
        Phase::Idle | Phase::Locked { .. } => return,
    };

    let throbber = Throbber::default()
        .label(label)
        .style(Style::default().fg(Color::Gray))
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    let mut throbber_state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, throbber_area, &mut throbber_state);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = match app.session.error() {
        Some(message) => Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        None => Span::styled(
            format!("{} · {}", app.session.phase().name(), app.api_base_url),
            Style::default().fg(Color::DarkGray),
        ),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_placeholder(app: &App, f: &mut Frame<'_>, area: Rect) {
    let text = match app.session.phase() {
        Phase::Analyzing { complex, .. } => format!("{} 분석 데이터를 불러오는 중...", complex.name),
        Phase::Locked { .. } => "표시할 분석 데이터가 없습니다.".to_string(),
        Phase::Idle | Phase::Searching { .. } => {
            "단지명을 입력하고 목록에서 선택하세요. (F1 도움말)".to_string()
        }
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn render_analysis(app: &App, analysis: &AnalysisResult, f: &mut Frame<'_>, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let [area_tabs_area, sales_area, bargains_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(60),
        Constraint::Percentage(40),
    ])
    .areas(left);

    render_area_tabs(app, analysis, f, area_tabs_area);

    let sales = app.session.filtered_sales();
    RecordTable::sales(
        format!(
            " 매물 {} / {} ",
            sales.len(),
            analysis.all_sales.len()
        ),
        &sales,
        app.selected_sale_index,
        app.focus == Focus::Sales,
    )
    .render(f, sales_area);

    RecordTable::bargains(
        &analysis.bargains,
        app.selected_bargain_index,
        app.focus == Focus::Bargains,
    )
    .render(f, bargains_area);

    let [chart_tabs_area, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(5)]).areas(right);

    let charts_focused = app.focus == Focus::Charts;
    render_chart_tabs(app.chart_tab_index, charts_focused, f, chart_tabs_area);
    render_chart_panel(analysis, app.chart_tab_index, charts_focused, f, chart_area);
}

fn render_area_tabs(app: &App, analysis: &AnalysisResult, f: &mut Frame<'_>, area: Rect) {
    let options = filter_options(analysis);
    let selected = options
        .iter()
        .position(|option| option == app.session.area_filter())
        .unwrap_or(0);

    let titles = options
        .iter()
        .map(|option| TextLine::from(option.label().to_string()))
        .collect::<Vec<_>>();

    let highlight = if app.focus == Focus::Sales {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(highlight).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn shortcuts_line(focus: Focus) -> TextLine<'static> {
    let mut spans = match focus {
        Focus::Query => vec![
            key("↑/↓"),
            Span::raw(": 결과 이동   "),
            key("Enter"),
            Span::raw(": 선택   "),
            key("Esc"),
            Span::raw(": 지우기/종료   "),
        ],
        Focus::Sales => vec![
            key("←/→"),
            Span::raw(": 평형   "),
            key("↑/↓"),
            Span::raw(": 이동   "),
            key("Enter"),
            Span::raw(": 상세   "),
            key("Esc"),
            Span::raw(": 검색창   "),
        ],
        Focus::Bargains => vec![
            key("↑/↓"),
            Span::raw(": 이동   "),
            key("Enter"),
            Span::raw(": 상세   "),
            key("Esc"),
            Span::raw(": 검색창   "),
        ],
        Focus::Charts => vec![
            key("←/→"),
            Span::raw(": 차트   "),
            key("Esc"),
            Span::raw(": 검색창   "),
        ],
    };

    spans.extend([key("Tab"), Span::raw(": 포커스   "), key("F1"), Span::raw(": 도움말")]);
    TextLine::from(spans)
}

fn render_shortcuts(focus: Focus, f: &mut Frame<'_>, area: Rect) {
    let shortcuts = Paragraph::new(shortcuts_line(focus))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}
