use form::{FieldUpdate, FormIntent};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    /// Redraw after a component changed only its own view state.
    Update,
    FocusNext,
    FocusPrev,
    /// A field edit, already shaped for the model.
    Edit(FieldUpdate),
    Submit,
    DismissConfirmation,
}

impl Action {
    /// Actions that mutate the form model map 1:1 onto model intents.
    pub fn as_intent(&self) -> Option<FormIntent> {
        match self {
            Action::Edit(update) => Some(FormIntent::SetField(update.clone())),
            Action::Submit => Some(FormIntent::Submit),
            Action::DismissConfirmation => Some(FormIntent::DismissConfirmation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_form_actions_become_intents() {
        assert_eq!(Action::Submit.as_intent(), Some(FormIntent::Submit));
        assert_eq!(
            Action::Edit(FieldUpdate::AcceptedTerms(true)).as_intent(),
            Some(FormIntent::SetField(FieldUpdate::AcceptedTerms(true)))
        );
        assert_eq!(Action::Tick.as_intent(), None);
        assert_eq!(Action::FocusNext.as_intent(), None);
    }

    #[test]
    fn display_uses_variant_names() {
        assert_eq!(Action::DismissConfirmation.to_string(), "DismissConfirmation");
    }
}
