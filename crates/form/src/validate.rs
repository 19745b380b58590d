use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    field::{FieldId, FormFields},
    profile::FormProfile,
};

/// Per-field messages currently shown. A missing key means "no error".
///
/// Keys are [`FieldId`]s, so the map can never mention a field the record
/// does not have. Iteration follows on-screen field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldId, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Set or clear the message of one field. Empty messages are treated as
    /// "no error" and never stored.
    pub fn set(&mut self, field: FieldId, message: Option<String>) {
        match message {
            Some(m) if !m.is_empty() => {
                self.0.insert(field, m);
            }
            _ => {
                self.0.remove(&field);
            }
        }
    }

    pub fn clear_field(&mut self, field: FieldId) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(FieldId, String)> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = (FieldId, String)>>(iter: T) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, message) in iter {
            errors.set(field, Some(message));
        }
        errors
    }
}

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub errors: ValidationErrors,
    pub is_valid: bool,
}

/// Check a single field against its rule. `None` means the field is fine.
pub fn validate_field(
    fields: &FormFields,
    field: FieldId,
    profile: &FormProfile,
) -> Option<&'static str> {
    let messages = &profile.messages;
    match field {
        FieldId::Name => fields
            .name
            .trim()
            .is_empty()
            .then_some(messages.name_required),
        FieldId::Email => {
            if fields.email.trim().is_empty() {
                Some(messages.email_required)
            } else if !profile.options.email_strictness.accepts(&fields.email) {
                Some(messages.email_invalid)
            } else {
                None
            }
        }
        FieldId::PassType => (!profile.is_pass(&fields.pass_type)).then_some(messages.pass_required),
        FieldId::AcceptedTerms => (!fields.accepted_terms).then_some(messages.terms_required),
        // Length is enforced on input; there is no comments rule.
        FieldId::Comments => None,
    }
}

/// Full validation pass. Every rule runs; nothing short-circuits across
/// fields.
pub fn validate(fields: &FormFields, profile: &FormProfile) -> ValidationReport {
    let errors: ValidationErrors = FieldId::iter()
        .filter_map(|f| validate_field(fields, f, profile).map(|m| (f, m.to_string())))
        .collect();
    let is_valid = errors.is_empty();
    ValidationReport { errors, is_valid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EmailStrictness, FormOptions, FormVariant};
    use pretty_assertions::assert_eq;

    fn ada() -> FormFields {
        FormFields {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            pass_type: "VIP".into(),
            accepted_terms: true,
            comments: String::new(),
        }
    }

    fn with_strictness(strictness: EmailStrictness) -> FormProfile {
        let profile = FormVariant::GuestPass.profile();
        let options = FormOptions {
            email_strictness: strictness,
            ..profile.options
        };
        profile.with_options(options)
    }

    #[test]
    fn defaults_produce_four_errors() {
        let profile = FormProfile::default();
        let report = validate(&FormFields::new(), &profile);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors.fields().collect::<Vec<_>>(),
            vec![
                FieldId::Name,
                FieldId::Email,
                FieldId::PassType,
                FieldId::AcceptedTerms
            ]
        );
        assert_eq!(
            report.errors.get(FieldId::Email),
            Some("El correo es requerido.")
        );
    }

    #[test]
    fn complete_record_is_valid() {
        let report = validate(&ada(), &FormProfile::default());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let profile = FormProfile::default();
        let mut fields = ada();
        fields.email = "nope".into();
        assert_eq!(validate(&fields, &profile), validate(&fields, &profile));
    }

    #[test]
    fn whitespace_only_name_is_required() {
        let mut fields = ada();
        fields.name = "   \t".into();
        let report = validate(&fields, &FormProfile::default());
        assert_eq!(report.errors.get(FieldId::Name), Some("El nombre es requerido."));
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn whitespace_only_email_is_required_not_invalid() {
        let mut fields = ada();
        fields.email = "  ".into();
        let report = validate(&fields, &FormProfile::default());
        assert_eq!(
            report.errors.get(FieldId::Email),
            Some("El correo es requerido.")
        );
    }

    #[test]
    fn missing_at_fails_in_both_modes() {
        let mut fields = ada();
        fields.email = "ada.example.com".into();
        for strictness in [EmailStrictness::Loose, EmailStrictness::Strict] {
            let report = validate(&fields, &with_strictness(strictness));
            assert!(report.errors.contains(FieldId::Email), "{strictness}");
        }
    }

    #[test]
    fn missing_dot_only_fails_when_strict() {
        let mut fields = ada();
        fields.email = "ada@example".into();
        assert!(validate(&fields, &with_strictness(EmailStrictness::Loose)).is_valid);
        let strict = validate(&fields, &with_strictness(EmailStrictness::Strict));
        assert_eq!(strict.errors.fields().collect::<Vec<_>>(), vec![FieldId::Email]);
    }

    #[test]
    fn pass_must_belong_to_the_variant() {
        let mut fields = ada();
        fields.pass_type = "Estudiante".into();
        let report = validate(&fields, &FormVariant::GuestPass.profile());
        assert_eq!(
            report.errors.get(FieldId::PassType),
            Some("Debe seleccionar un tipo de pase.")
        );
        let workshop = FormVariant::Workshop.profile();
        assert!(validate(&fields, &workshop).is_valid);
    }

    #[test]
    fn comments_never_error() {
        let mut fields = ada();
        fields.comments = "x".repeat(500);
        assert_eq!(validate_field(&fields, FieldId::Comments, &FormProfile::default()), None);
    }

    #[test]
    fn empty_messages_are_not_stored() {
        let mut errors = ValidationErrors::new();
        errors.set(FieldId::Name, Some(String::new()));
        assert!(errors.is_empty());
        errors.set(FieldId::Name, Some("x".into()));
        errors.set(FieldId::Name, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn errors_serialize_by_wire_key() {
        let report = validate(&FormFields::new(), &FormProfile::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"]["acceptedTerms"], "Debe aceptar los términos y condiciones.");
    }
}
