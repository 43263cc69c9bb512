use crate::domain::Candidate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use ratatui::Frame;

pub const MAX_VISIBLE_CANDIDATES: u16 = 8;

/// Char positions of `name` matched by `query`, for highlighting only.
/// Candidates are never reordered or dropped here.
pub fn match_indices(name: &str, query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    SkimMatcherV2::default()
        .smart_case()
        .fuzzy_indices(name, query)
        .map(|(_, indices)| indices)
        .unwrap_or_default()
}

fn highlighted_line(name: &str, indices: &[usize]) -> TextLine<'static> {
    let plain = Style::default().fg(Color::White);
    let matched = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let spans: Vec<Span<'static>> = name
        .chars()
        .enumerate()
        .map(|(position, c)| {
            let style = if indices.contains(&position) { matched } else { plain };
            Span::styled(c.to_string(), style)
        })
        .collect();

    TextLine::from(spans)
}

pub fn dropdown_height(candidates: usize) -> u16 {
    u16::try_from(candidates)
        .unwrap_or(u16::MAX)
        .min(MAX_VISIBLE_CANDIDATES)
        .saturating_add(2)
}

pub fn render_candidate_dropdown(
    candidates: &[Candidate],
    query: &str,
    selected: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    if candidates.is_empty() || area.height < 3 {
        return;
    }

    let items: Vec<ListItem<'static>> = candidates
        .iter()
        .map(|candidate| {
            let indices = match_indices(&candidate.name, query);
            ListItem::new(highlighted_line(&candidate.name, &indices))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" 검색 결과 {} ", candidates.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected.min(candidates.len() - 1)));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_matched_characters() {
        let indices = match_indices("Raemian Palace", "rp");
        assert_eq!(indices.first(), Some(&0));
        assert!(indices.contains(&8));
    }

    #[test]
    fn no_highlight_for_blank_query_or_miss() {
        assert!(match_indices("Raemian", "  ").is_empty());
        assert!(match_indices("Raemian", "xyz").is_empty());
    }

    #[test]
    fn highlighted_line_keeps_every_character() {
        let line = highlighted_line("래미안", &[1]);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "미");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn dropdown_height_is_capped() {
        assert_eq!(dropdown_height(1), 3);
        assert_eq!(dropdown_height(50), MAX_VISIBLE_CANDIDATES + 2);
    }
}
