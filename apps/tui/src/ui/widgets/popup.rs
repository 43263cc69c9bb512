use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rect of `percent_x` by `percent_y` centered inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [middle] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(middle);
    center
}

/// Rect of a fixed size centered inside `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [middle] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(middle);
    center
}

/// Rect directly below `anchor`, clipped to `bounds`.
pub fn below(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let y = anchor.y.saturating_add(anchor.height);
    let available = bounds.bottom().saturating_sub(y);
    Rect {
        x: anchor.x,
        y,
        width: width.min(bounds.right().saturating_sub(anchor.x)),
        height: height.min(available),
    }
}
