use std::{env, fs, path::PathBuf};

use clap::Parser;
use form::{FieldId, FormVariant};
use rsvp::{
    check,
    cli::{Cli, Cmd},
    config::Config,
};

fn unique_temp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = env::temp_dir().join(format!("rsvp_it_{name}_{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn check_args(cli: &Cli) -> &rsvp::cli::CheckArgs {
    match &cli.cmd {
        Some(Cmd::Check(args)) => args,
        other => panic!("expected check, got {other:?}"),
    }
}

#[test]
fn json5_config_selects_workshop_rules() {
    let dir = unique_temp_dir("json5");
    fs::write(
        dir.join("config.json5"),
        "{ form: { variant: 'workshop' } }",
    )
    .unwrap();
    let config = Config::from_dir(&dir).unwrap();

    let cli = Cli::try_parse_from([
        "rsvp",
        "check",
        "--name",
        "Ada",
        "--email",
        "ada@example",
        "--pass",
        "Estudiante",
        "--accept-terms",
    ])
    .unwrap();
    let profile = config.resolve_profile(&cli.form);
    assert_eq!(profile.variant, FormVariant::Workshop);

    let report = check::check(profile, check_args(&cli)).unwrap();
    assert!(!report.report.is_valid);
    assert_eq!(report.report.errors.fields().collect::<Vec<_>>(), vec![FieldId::Email]);
}

#[test]
fn flag_relaxes_the_configured_strictness() {
    let dir = unique_temp_dir("flag");
    let config = Config::from_dir(&dir).unwrap();

    let cli = Cli::try_parse_from([
        "rsvp",
        "--variant",
        "workshop",
        "--email-check",
        "loose",
        "check",
        "--name",
        "Ada",
        "--email",
        "ada@example",
        "--pass",
        "Profesional",
        "--accept-terms",
    ])
    .unwrap();
    let profile = config.resolve_profile(&cli.form);

    let mut out = Vec::new();
    let valid = check::run(profile, check_args(&cli), &mut out).unwrap();
    assert!(valid);
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["fields"]["passType"], "Profesional");
    assert_eq!(json["errors"], serde_json::json!({}));
}

#[test]
fn set_pairs_fill_the_record_by_wire_key() {
    let config = Config::from_dir(&unique_temp_dir("set")).unwrap();
    let cli = Cli::try_parse_from([
        "rsvp",
        "check",
        "--set",
        "name=Grace",
        "--set",
        "email=grace@navy.mil",
        "--set",
        "passType=VIP",
        "--set",
        "acceptedTerms=true",
    ])
    .unwrap();
    let profile = config.resolve_profile(&cli.form);

    let mut out = Vec::new();
    assert!(check::run(profile.clone(), check_args(&cli), &mut out).unwrap());
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["fields"]["name"], "Grace");
    assert_eq!(json["fields"]["acceptedTerms"], true);

    let bad = Cli::try_parse_from(["rsvp", "check", "--set", "telefono=1"]).unwrap();
    assert!(check::run(profile, check_args(&bad), &mut Vec::new()).is_err());
}
