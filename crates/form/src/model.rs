//! Registration form session state.
//!
//! `RegistrationFormModel` owns the only mutable state of a form session:
//! the field record, the messages currently shown and the confirmation flag.
//! Views never mutate it directly; they read a [`FormSnapshot`] and either
//! call the operations below or feed [`FormIntent`]s through
//! [`RegistrationFormModel::dispatch`].
//!
//! State machine:
//!
//! ```text
//!   Editing --submit (invalid)--> Editing (errors stored)
//!   Editing --submit (valid)----> Confirmed
//!   Confirmed --dismiss---------> Editing (defaults, no errors)
//! ```
//!
//! Edits while confirmed are ignored: the record stays exactly as submitted
//! until dismissal resets it.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    errors::FieldError,
    field::{FieldId, FieldUpdate, FieldValue, FormFields},
    profile::{FormProfile, ValidationTiming},
    validate::{ValidationErrors, ValidationReport, validate, validate_field},
};

/// Event forwarded by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum FormIntent {
    SetField(FieldUpdate),
    Submit,
    DismissConfirmation,
}

/// Read-only view handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub errors: ValidationErrors,
    pub is_submit_confirmed: bool,
    pub can_submit: bool,
}

/// The simulated submission. Nothing is transmitted; it is logged and shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub fields: FormFields,
}

impl Submission {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.fields).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed(Submission),
    Rejected(ValidationErrors),
    /// Submit while the confirmation is already showing; nothing changes.
    AlreadyConfirmed,
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed(_))
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationFormModel {
    profile: FormProfile,
    fields: FormFields,
    errors: ValidationErrors,
    is_submit_confirmed: bool,
}

impl Default for RegistrationFormModel {
    fn default() -> Self {
        Self::new(FormProfile::default())
    }
}

impl RegistrationFormModel {
    pub fn new(profile: FormProfile) -> Self {
        Self {
            profile,
            fields: FormFields::new(),
            errors: ValidationErrors::new(),
            is_submit_confirmed: false,
        }
    }

    pub fn profile(&self) -> &FormProfile {
        &self.profile
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submit_confirmed(&self) -> bool {
        self.is_submit_confirmed
    }

    /// Whether a submit right now would succeed. Recomputed on every call.
    pub fn can_submit(&self) -> bool {
        self.validate().is_valid
    }

    /// Whether the view should offer the submit control at all.
    pub fn submit_enabled(&self) -> bool {
        !self.profile.options.gate_submit || self.can_submit()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            is_submit_confirmed: self.is_submit_confirmed,
            can_submit: self.can_submit(),
        }
    }

    /// Pure validation pass over the current record. Does not store errors.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.fields, &self.profile)
    }

    /// Replace a single field.
    ///
    /// With [`ValidationTiming::OnSubmit`] a message on the edited field is
    /// dropped without re-checking it. With [`ValidationTiming::OnChange`]
    /// the field is re-checked and its message set or cleared.
    ///
    /// Ignored while the confirmation is showing.
    pub fn set_field(&mut self, update: FieldUpdate) {
        if self.is_submit_confirmed {
            debug!(field = %update.field(), "edit ignored while confirmed");
            return;
        }
        let field = self.fields.apply(update);
        trace!(field = %field, "field updated");

        match self.profile.options.validation_timing {
            ValidationTiming::OnSubmit => {
                self.errors.clear_field(field);
            }
            ValidationTiming::OnChange => {
                let message = validate_field(&self.fields, field, &self.profile);
                self.errors.set(field, message.map(str::to_string));
            }
        }
    }

    /// Untyped variant of [`Self::set_field`] for views that route raw
    /// input by field id. State is untouched on error.
    pub fn set_field_value(&mut self, field: FieldId, value: FieldValue) -> Result<(), FieldError> {
        let update = FieldUpdate::from_value(field, value)?;
        self.set_field(update);
        Ok(())
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submit_confirmed {
            return SubmitOutcome::AlreadyConfirmed;
        }

        let report = self.validate();
        if !report.is_valid {
            debug!(
                errors = report.errors.len(),
                "submit rejected by validation"
            );
            self.errors = report.errors.clone();
            return SubmitOutcome::Rejected(report.errors);
        }

        self.errors.clear();
        self.is_submit_confirmed = true;
        let submission = Submission {
            fields: self.fields.clone(),
        };
        info!(
            variant = %self.profile.variant,
            submission = %submission.to_json(),
            "valid form, simulated submit"
        );
        SubmitOutcome::Confirmed(submission)
    }

    pub fn dismiss_confirmation(&mut self) {
        debug!(was_confirmed = self.is_submit_confirmed, "confirmation dismissed");
        self.is_submit_confirmed = false;
        self.fields = FormFields::new();
        self.errors.clear();
    }

    /// Reducer entry point. Only `Submit` produces an outcome.
    pub fn dispatch(&mut self, intent: FormIntent) -> Option<SubmitOutcome> {
        match intent {
            FormIntent::SetField(update) => {
                self.set_field(update);
                None
            }
            FormIntent::Submit => Some(self.submit()),
            FormIntent::DismissConfirmation => {
                self.dismiss_confirmation();
                None
            }
        }
    }
}
