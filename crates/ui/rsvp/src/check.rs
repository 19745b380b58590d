use std::io::Write;

use color_eyre::{Result, eyre::eyre};
use form::{
    FieldId, FieldUpdate, FormFields, FormProfile, FormVariant, RegistrationFormModel,
    ValidationReport,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::CheckArgs;

/// Output of `rsvp check`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub variant: FormVariant,
    pub fields: FormFields,
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Validate the record given on the command line against `profile`.
///
/// `--set KEY=VALUE` pairs go through the dynamic field path, so an unknown
/// key or a value of the wrong type is an error rather than a report.
pub fn check(profile: FormProfile, args: &CheckArgs) -> Result<CheckReport> {
    let variant = profile.variant;
    let mut model = RegistrationFormModel::new(profile);
    for update in [
        FieldUpdate::Name(args.name.clone()),
        FieldUpdate::Email(args.email.clone()),
        FieldUpdate::PassType(args.pass_type.clone()),
        FieldUpdate::AcceptedTerms(args.accept_terms),
        FieldUpdate::Comments(args.comments.clone()),
    ] {
        model.set_field(update);
    }
    for raw in &args.set {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| eyre!("expected KEY=VALUE, got `{raw}`"))?;
        let field = FieldId::parse(key)?;
        debug!(%field, "set from command line");
        model.set_field_value(field, field.parse_value(value)?)?;
    }
    Ok(CheckReport {
        variant,
        fields: model.fields().clone(),
        report: model.validate(),
    })
}

/// Print the report as pretty JSON. Returns whether the record is valid.
pub fn run<W: Write>(profile: FormProfile, args: &CheckArgs, mut out: W) -> Result<bool> {
    let report = check(profile, args)?;
    info!(
        variant = %report.variant,
        valid = report.report.is_valid,
        "headless check"
    );
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(report.report.is_valid)
}
