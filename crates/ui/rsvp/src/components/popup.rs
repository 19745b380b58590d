//! Modal helpers shared by dialogs drawn over the page.
//!
//! Usage:
//! 1) draw the page as usual
//! 2) `render_backdrop(frame, area)`
//! 3) `centered_rect_fixed(area, w, h)` for the dialog rect
//! 4) `draw_popup_frame(frame, dialog, title, theme)` and draw content inside

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::{
    theme::{Theme, UiGroup},
    tui::Frame,
};

/// Dim the page behind a modal. Terminals have no transparency, so this is a
/// solid dark fill.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    frame.render_widget(Clear, area);
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Centered rect of fixed size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Rounded frame with a title. Returns the inner area.
pub fn draw_popup_frame(
    frame: &mut Frame<'_>,
    area: Rect,
    title: impl Into<String>,
    theme: &Theme,
) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .title_style(theme.style(UiGroup::Success))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .border_style(theme.style(UiGroup::FocusBorder))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(area, 60, 10), Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn clamps_to_small_areas() {
        let area = Rect::new(5, 5, 30, 8);
        let r = centered_rect_fixed(area, 60, 20);
        assert_eq!(r, Rect::new(5, 5, 30, 8));
    }
}
