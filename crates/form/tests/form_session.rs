//! End-to-end behaviour of a form session through the public API:
//! - single-field updates leave the rest of the record alone
//! - validation on the default record and on a complete record
//! - e-mail strictness as a switch
//! - submit / dismiss lifecycle

use form::{
    COMMENTS_MAX_LEN, EmailStrictness, FieldId, FieldUpdate, FieldValue, FormFields,
    FormIntent, FormOptions, FormProfile, FormVariant, RegistrationFormModel, SubmitOutcome,
};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

fn ada() -> Vec<FieldUpdate> {
    vec![
        FieldUpdate::Name("Ada Lovelace".into()),
        FieldUpdate::Email("ada@example.com".into()),
        FieldUpdate::PassType("VIP".into()),
        FieldUpdate::AcceptedTerms(true),
        FieldUpdate::Comments(String::new()),
    ]
}

fn sample_value(field: FieldId) -> FieldValue {
    match field {
        FieldId::AcceptedTerms => FieldValue::Flag(true),
        other => FieldValue::Text(format!("value-for-{other}")),
    }
}

fn model_with(strictness: EmailStrictness) -> RegistrationFormModel {
    let profile = FormProfile::default();
    let options = FormOptions {
        email_strictness: strictness,
        ..profile.options
    };
    RegistrationFormModel::new(profile.with_options(options))
}

#[test]
fn set_field_touches_exactly_one_field() {
    for field in FieldId::iter() {
        let mut model = RegistrationFormModel::default();
        let before = model.snapshot().fields;
        model
            .set_field_value(field, sample_value(field))
            .expect("matching value type");
        let after = model.snapshot().fields;

        assert_eq!(after.value(field), sample_value(field), "{field}");
        for other in FieldId::iter().filter(|f| *f != field) {
            assert_eq!(after.value(other), before.value(other), "{field} changed {other}");
        }
    }
}

#[test]
fn default_record_reports_four_errors() {
    let model = RegistrationFormModel::default();
    let report = model.validate();
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 4);
    assert!(!report.errors.contains(FieldId::Comments));
    // The pure pass does not store anything.
    assert!(model.errors().is_empty());
}

#[test]
fn complete_record_validates_clean() {
    let mut model = RegistrationFormModel::default();
    for update in ada() {
        model.set_field(update);
    }
    let report = model.validate();
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
    assert_eq!(model.validate(), report);
}

#[test]
fn strictness_switch_controls_missing_dot() {
    for (strictness, expect_error) in [
        (EmailStrictness::Loose, false),
        (EmailStrictness::Strict, true),
    ] {
        let mut model = model_with(strictness);
        model.set_field(FieldUpdate::Email("ada@example".into()));
        assert_eq!(
            model.validate().errors.contains(FieldId::Email),
            expect_error,
            "{strictness}"
        );

        model.set_field(FieldUpdate::Email("ada.example.com".into()));
        assert!(model.validate().errors.contains(FieldId::Email));
    }
}

#[test]
fn full_session_lifecycle() {
    let mut model = RegistrationFormModel::default();

    // First attempt: everything missing.
    let outcome = model.dispatch(FormIntent::Submit).expect("submit outcome");
    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection");
    };
    assert_eq!(&errors, model.errors());
    assert!(!model.is_submit_confirmed());

    for update in ada() {
        model.dispatch(FormIntent::SetField(update));
    }
    assert!(model.errors().is_empty());
    let submitted = model.fields().clone();

    match model.dispatch(FormIntent::Submit) {
        Some(SubmitOutcome::Confirmed(submission)) => assert_eq!(submission.fields, submitted),
        other => panic!("expected confirmation, got {other:?}"),
    }
    let snap = model.snapshot();
    assert!(snap.is_submit_confirmed);
    assert_eq!(snap.fields, submitted);

    model.dispatch(FormIntent::DismissConfirmation);
    let snap = model.snapshot();
    assert_eq!(snap.fields, FormFields::new());
    assert!(snap.errors.is_empty());
    assert!(!snap.is_submit_confirmed);
    assert!(!snap.can_submit);
}

#[test]
fn long_comments_never_reach_the_model() {
    let mut model = RegistrationFormModel::default();
    model.set_field(FieldUpdate::Comments("z".repeat(COMMENTS_MAX_LEN * 2)));
    assert_eq!(form::field::utf16_len(&model.fields().comments), COMMENTS_MAX_LEN);

    model.set_field(FieldUpdate::Comments("🎉".repeat(COMMENTS_MAX_LEN)));
    assert_eq!(model.fields().comments.chars().count(), COMMENTS_MAX_LEN / 2);
}

#[test]
fn workshop_variant_runs_its_own_rules() {
    let mut model = RegistrationFormModel::new(FormVariant::Workshop.profile());
    model.set_field(FieldUpdate::Name("Grace Hopper".into()));
    model.set_field(FieldUpdate::Email("grace@navy".into()));
    model.set_field(FieldUpdate::PassType("VIP".into()));
    model.set_field(FieldUpdate::AcceptedTerms(true));

    let SubmitOutcome::Rejected(errors) = model.submit() else {
        panic!("expected rejection");
    };
    assert_eq!(
        errors.get(FieldId::Email),
        Some("El correo no es válido (ej: usuario@dominio.com).")
    );
    assert_eq!(
        errors.get(FieldId::PassType),
        Some("Debe seleccionar un tipo de asistencia.")
    );
}
