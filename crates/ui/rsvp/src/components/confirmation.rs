use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use form::{ConfirmationSummary, RegistrationFormModel};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::{
        Component,
        popup::{centered_rect_fixed, draw_popup_frame, render_backdrop},
    },
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

const MIN_WIDTH: u16 = 64;

/// Modal shown while the submit is confirmed.
///
/// Behavior:
/// - Enter / Space / Esc: dismiss (resets the form)
/// - any other key is swallowed so nothing leaks into the form behind it
pub struct ConfirmationDialog {
    theme: Theme,
}

impl ConfirmationDialog {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Component for ConfirmationDialog {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        if !model.is_submit_confirmed() {
            return Ok(None);
        }
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::DismissConfirmation,
            _ => Action::Update,
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_paste(
        &mut self,
        _text: &str,
        model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(model
            .is_submit_confirmed()
            .then_some(EventResponse::Stop(Action::Update)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, model: &RegistrationFormModel) -> Result<()> {
        if !model.is_submit_confirmed() {
            return Ok(());
        }
        let theme = &self.theme;
        let summary = ConfirmationSummary::from_fields(model.fields(), model.profile());

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(summary.body, theme.style(UiGroup::Label))),
            Line::raw(""),
        ];
        for row in summary.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", row.heading), theme.style(UiGroup::Title)),
                Span::styled(row.value, theme.style(UiGroup::Value)),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(
            Line::from(Span::styled(
                format!("[ {} ]", model.profile().copy.close_label),
                theme.style(UiGroup::ButtonFocused),
            ))
            .alignment(Alignment::Center),
        );

        let width = MIN_WIDTH.max(area.width / 2).min(area.width);
        let height = wrapped_height(&lines, width.saturating_sub(2)) + 2;
        render_backdrop(f, area);
        let dialog = centered_rect_fixed(area, width, height);
        let inner = draw_popup_frame(f, dialog, summary.title, theme);
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        Ok(())
    }
}

/// Rows `lines` take when word-wrapped into `width` columns.
///
/// Word wrap can leave the tail of a row empty, so every line that wraps
/// gets one spare row.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| match line.width().div_ceil(width) {
            0 => 1,
            1 => 1,
            n => n + 1,
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
