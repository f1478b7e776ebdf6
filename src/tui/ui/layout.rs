use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};

/// Area inside a one-cell border.
pub(super) fn inner(area: Rect) -> Rect {
    area.inner(Margin { horizontal: 1, vertical: 1 })
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] =
        Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center).areas(r);
    let [area] =
        Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(row);
    area
}
