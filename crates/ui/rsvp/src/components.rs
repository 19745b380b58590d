use color_eyre::Result;
use crossterm::event::KeyEvent;
use form::RegistrationFormModel;
use ratatui::layout::Rect;

use crate::{
    action::Action,
    tui::{Event, EventResponse, Frame},
};

pub mod confirmation;
pub mod form_panel;
pub mod popup;
pub mod summary;

/// `Component` is a visual and interactive part of the page.
///
/// Components never own form data. They read the [`RegistrationFormModel`]
/// they are handed and answer input with [`Action`]s; the app applies those
/// to the model and then lets every component react in [`Component::update`].
pub trait Component {
    fn handle_events(
        &mut self,
        event: &Event,
        model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(*key_event, model)?,
            Event::Paste(text) => self.handle_paste(text, model)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn handle_paste(
        &mut self,
        _text: &str,
        _model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    /// Called after the app has applied `action` to the model.
    fn update(&mut self, _action: &Action, _model: &RegistrationFormModel) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, model: &RegistrationFormModel) -> Result<()>;
}

/// Flatten a rendered buffer into newline-separated rows (test helper).
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
