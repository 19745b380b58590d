use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use form::{
    COMMENTS_MAX_LEN, FieldId, FieldUpdate, RegistrationFormModel,
    field::{clamp_utf16, utf16_len},
};
use ratatui::{
    layout::Rect,
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    action::Action,
    components::Component,
    theme::{Theme, UiGroup},
    tui::{EventResponse, Frame},
};

/// Focusable slots of the panel, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Name,
    Email,
    PassType,
    Comments,
    AcceptedTerms,
    Submit,
}

impl Slot {
    pub const ORDER: [Slot; 6] = [
        Slot::Name,
        Slot::Email,
        Slot::PassType,
        Slot::Comments,
        Slot::AcceptedTerms,
        Slot::Submit,
    ];

    pub fn field(self) -> Option<FieldId> {
        match self {
            Slot::Name => Some(FieldId::Name),
            Slot::Email => Some(FieldId::Email),
            Slot::PassType => Some(FieldId::PassType),
            Slot::Comments => Some(FieldId::Comments),
            Slot::AcceptedTerms => Some(FieldId::AcceptedTerms),
            Slot::Submit => None,
        }
    }

    fn for_field(field: FieldId) -> Self {
        match field {
            FieldId::Name => Slot::Name,
            FieldId::Email => Slot::Email,
            FieldId::PassType => Slot::PassType,
            FieldId::Comments => Slot::Comments,
            FieldId::AcceptedTerms => Slot::AcceptedTerms,
        }
    }
}

/// The registration form itself.
///
/// Text slots keep a `tui_input::Input` for cursor handling; every change is
/// forwarded as an [`Action::Edit`] so the model always holds the record.
/// Pass, terms and submit read their state straight from the model.
pub struct FormPanel {
    theme: Theme,
    focused: usize,
    name: Input,
    email: Input,
    comments: Input,
}

impl FormPanel {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            focused: 0,
            name: Input::default(),
            email: Input::default(),
            comments: Input::default(),
        }
    }

    pub fn focused(&self) -> Slot {
        Slot::ORDER[self.focused]
    }

    pub fn focus(&mut self, slot: Slot) {
        if let Some(idx) = Slot::ORDER.iter().position(|s| *s == slot) {
            self.focused = idx;
        }
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % Slot::ORDER.len();
    }

    fn focus_prev(&mut self) {
        if self.focused == 0 {
            self.focused = Slot::ORDER.len() - 1;
        } else {
            self.focused -= 1;
        }
    }

    fn input(&self, slot: Slot) -> Option<&Input> {
        match slot {
            Slot::Name => Some(&self.name),
            Slot::Email => Some(&self.email),
            Slot::Comments => Some(&self.comments),
            _ => None,
        }
    }

    fn input_mut(&mut self, slot: Slot) -> Option<&mut Input> {
        match slot {
            Slot::Name => Some(&mut self.name),
            Slot::Email => Some(&mut self.email),
            Slot::Comments => Some(&mut self.comments),
            _ => None,
        }
    }

    /// Re-seed the text inputs from the model (after a reset).
    fn sync_inputs(&mut self, model: &RegistrationFormModel) {
        let fields = model.fields();
        self.name = Input::new(fields.name.clone());
        self.email = Input::new(fields.email.clone());
        self.comments = Input::new(fields.comments.clone());
    }

    fn text_update(slot: Slot, value: String) -> Option<FieldUpdate> {
        match slot {
            Slot::Name => Some(FieldUpdate::Name(value)),
            Slot::Email => Some(FieldUpdate::Email(value)),
            Slot::Comments => Some(FieldUpdate::Comments(value)),
            _ => None,
        }
    }

    /// Feed a key into the focused text input. `None` if the input ignored it.
    fn edit_text(&mut self, slot: Slot, key: KeyEvent) -> Option<Action> {
        let input = self.input_mut(slot)?;
        let before = input.clone();
        let changed = input.handle_event(&CrosstermEvent::Key(key))?;
        if !changed.value {
            return Some(Action::Update);
        }
        if slot == Slot::Comments && utf16_len(input.value()) > COMMENTS_MAX_LEN {
            *input = before;
            return Some(Action::Update);
        }
        let value = input.value().to_string();
        Self::text_update(slot, value).map(Action::Edit)
    }

    fn select_pass(model: &RegistrationFormModel, index: usize) -> Action {
        let passes = &model.profile().passes;
        let option = passes[index.min(passes.len() - 1)];
        Action::Edit(FieldUpdate::PassType(option.value.to_string()))
    }

    /// Unset selects the first option, otherwise flip to the other one.
    fn cycle_pass(model: &RegistrationFormModel) -> Action {
        let current = &model.fields().pass_type;
        let next = model
            .profile()
            .passes
            .iter()
            .position(|p| p.value == current.as_str())
            .map(|idx| (idx + 1) % model.profile().passes.len())
            .unwrap_or(0);
        Self::select_pass(model, next)
    }

    fn toggle_terms(model: &RegistrationFormModel) -> Action {
        Action::Edit(FieldUpdate::AcceptedTerms(!model.fields().accepted_terms))
    }

    fn submit(model: &RegistrationFormModel) -> Action {
        if model.submit_enabled() {
            Action::Submit
        } else {
            Action::Update
        }
    }
}

impl Component for FormPanel {
    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        let slot = self.focused();
        let action = match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Self::submit(model)
            }
            KeyCode::Tab | KeyCode::Down => Action::FocusNext,
            KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
            KeyCode::Enter => match slot {
                Slot::Submit => Self::submit(model),
                Slot::AcceptedTerms => Self::toggle_terms(model),
                _ => Action::FocusNext,
            },
            _ => match slot {
                Slot::Name | Slot::Email | Slot::Comments => match self.edit_text(slot, key) {
                    Some(action) => action,
                    None => return Ok(None),
                },
                Slot::PassType => match key.code {
                    KeyCode::Left | KeyCode::Char('1') => Self::select_pass(model, 0),
                    KeyCode::Right | KeyCode::Char('2') => Self::select_pass(model, 1),
                    KeyCode::Char(' ') => Self::cycle_pass(model),
                    _ => return Ok(None),
                },
                Slot::AcceptedTerms => match key.code {
                    KeyCode::Char(' ') => Self::toggle_terms(model),
                    _ => return Ok(None),
                },
                Slot::Submit => match key.code {
                    KeyCode::Char(' ') => Self::submit(model),
                    _ => return Ok(None),
                },
            },
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_paste(
        &mut self,
        text: &str,
        _model: &RegistrationFormModel,
    ) -> Result<Option<EventResponse<Action>>> {
        let slot = self.focused();
        let Some(input) = self.input_mut(slot) else {
            return Ok(None);
        };
        // single-line inputs
        let mut pasted = text.replace(['\r', '\n'], " ");
        let cursor = input.cursor();
        let split = input
            .value()
            .char_indices()
            .nth(cursor)
            .map_or(input.value().len(), |(idx, _)| idx);
        let (head, tail) = input.value().split_at(split);
        if slot == Slot::Comments {
            let room = COMMENTS_MAX_LEN.saturating_sub(utf16_len(head) + utf16_len(tail));
            pasted = clamp_utf16(pasted, room);
        }
        let value = format!("{head}{pasted}{tail}");
        *input = Input::new(value.clone()).with_cursor(cursor + pasted.chars().count());
        Ok(Self::text_update(slot, value).map(|u| EventResponse::Stop(Action::Edit(u))))
    }

    fn update(&mut self, action: &Action, model: &RegistrationFormModel) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::DismissConfirmation => {
                self.sync_inputs(model);
                self.focused = 0;
            }
            Action::Submit => {
                if let Some(first) = model.errors().fields().next() {
                    self.focus(Slot::for_field(first));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, model: &RegistrationFormModel) -> Result<()> {
        let theme = &self.theme;
        let profile = model.profile();
        let copy = &profile.copy;

        let block = Block::default()
            .title(format!(" {} ", copy.form_title))
            .title_style(theme.style(UiGroup::Title))
            .borders(Borders::ALL)
            .border_set(symbols::border::ROUNDED)
            .border_style(theme.style(UiGroup::Border));
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.width < 4 || inner.height < 3 {
            return Ok(());
        }

        let value_width = inner.width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = Vec::new();
        let mut cursor: Option<(u16, u16)> = None;

        for slot in Slot::ORDER {
            let focused = slot == self.focused();
            let label_style = if focused {
                theme.style(UiGroup::Selected)
            } else {
                theme.style(UiGroup::Label)
            };
            let marker = Span::styled(if focused { "> " } else { "  " }, label_style);

            match slot {
                Slot::Name | Slot::Email | Slot::Comments => {
                    let (label, placeholder) = match slot {
                        Slot::Name => (copy.name_label, copy.name_placeholder),
                        Slot::Email => (copy.email_label, copy.email_placeholder),
                        _ => (copy.comments_label, copy.comments_placeholder),
                    };
                    lines.push(Line::from(Span::styled(label, label_style)));

                    let Some(input) = self.input(slot) else {
                        continue;
                    };
                    let scroll = input.visual_scroll(value_width);
                    let value = if input.value().is_empty() {
                        Span::styled(placeholder.unwrap_or(""), theme.style(UiGroup::Dimmed))
                    } else {
                        let visible: String =
                            input.value().chars().skip(scroll).take(value_width).collect();
                        Span::styled(visible, theme.style(UiGroup::Value))
                    };
                    if focused {
                        let x = inner.x + 2 + input.visual_cursor().saturating_sub(scroll) as u16;
                        cursor = Some((x, inner.y + lines.len() as u16));
                    }
                    lines.push(Line::from(vec![marker, value]));

                    if slot == Slot::Comments {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", profile.comments_counter(&model.fields().comments)),
                            theme.style(UiGroup::Dimmed),
                        )));
                    }
                }
                Slot::PassType => {
                    lines.push(Line::from(Span::styled(copy.pass_label, label_style)));
                    let mut spans = vec![marker];
                    for option in &profile.passes {
                        let selected = model.fields().pass_type == option.value;
                        let (mark, style) = if selected {
                            ("(•) ", theme.style(UiGroup::Selected))
                        } else {
                            ("( ) ", theme.style(UiGroup::Label))
                        };
                        spans.push(Span::styled(format!("{mark}{}", option.label), style));
                        spans.push(Span::raw("   "));
                    }
                    lines.push(Line::from(spans));
                }
                Slot::AcceptedTerms => {
                    let mark = if model.fields().accepted_terms { "[x] " } else { "[ ] " };
                    lines.push(Line::from(vec![
                        marker,
                        Span::styled(format!("{mark}{}", copy.terms_label), label_style),
                    ]));
                }
                Slot::Submit => {
                    let style = if !model.submit_enabled() {
                        theme.style(UiGroup::ButtonDisabled)
                    } else if focused {
                        theme.style(UiGroup::ButtonFocused)
                    } else {
                        theme.style(UiGroup::Button)
                    };
                    lines.push(Line::from(vec![
                        marker,
                        Span::styled(format!("[ {} ]", copy.submit_label), style),
                    ]));
                }
            }

            if let Some(message) = slot.field().and_then(|field| model.errors().get(field)) {
                lines.push(Line::from(Span::styled(
                    format!("  {message}"),
                    theme.style(UiGroup::Error),
                )));
            }
            lines.push(Line::raw(""));
        }

        lines.push(Line::from(Span::styled(
            "Tab/↓ siguiente · ←/→ pase · Espacio marcar · Ctrl+S enviar · Esc salir",
            theme.style(UiGroup::Dimmed),
        )));

        f.render_widget(Paragraph::new(lines), inner);

        if let Some((x, y)) = cursor {
            if !model.is_submit_confirmed() && x < inner.right() && y < inner.bottom() {
                f.set_cursor_position((x, y));
            }
        }
        Ok(())
    }
}
