// src/cli.rs
use clap::{Args, Parser, Subcommand, ValueEnum};
use form::{EmailStrictness, FormVariant, ValidationTiming};

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(name = "rsvp", version = version(), about = "Event registration form (guest pass / workshop)")]
pub struct Cli {
    #[command(flatten)]
    pub form: FormArgs,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

/// Overrides for the form profile. Anything left out falls back to the
/// config file and then to the variant preset.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Which form to show
    #[arg(long, value_enum, global = true)]
    pub variant: Option<VariantArg>,

    /// E-mail format check
    #[arg(long = "email-check", value_enum, global = true)]
    pub email_strictness: Option<StrictnessArg>,

    /// When field messages are recomputed
    #[arg(long = "validation", value_enum, global = true)]
    pub validation_timing: Option<TimingArg>,

    /// Disable the submit button until the form is valid
    #[arg(long, value_name = "BOOL", global = true)]
    pub gate_submit: Option<bool>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Run the interactive form (default)
    Run,
    /// Validate a record without a terminal UI and print the report as JSON
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    /// Pass option value, e.g. `VIP` or `Estudiante`
    #[arg(long = "pass", default_value = "")]
    pub pass_type: String,
    #[arg(long)]
    pub accept_terms: bool,
    #[arg(long, default_value = "")]
    pub comments: String,
    /// Set a field by its wire key, e.g. `passType=VIP` or `acceptedTerms=true`.
    /// Applied after the named flags, in order.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    GuestPass,
    Workshop,
}

impl From<VariantArg> for FormVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::GuestPass => FormVariant::GuestPass,
            VariantArg::Workshop => FormVariant::Workshop,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrictnessArg {
    Loose,
    Strict,
}

impl From<StrictnessArg> for EmailStrictness {
    fn from(value: StrictnessArg) -> Self {
        match value {
            StrictnessArg::Loose => EmailStrictness::Loose,
            StrictnessArg::Strict => EmailStrictness::Strict,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TimingArg {
    OnSubmit,
    OnChange,
}

impl From<TimingArg> for ValidationTiming {
    fn from(value: TimingArg) -> Self {
        match value {
            TimingArg::OnSubmit => ValidationTiming::OnSubmit,
            TimingArg::OnChange => ValidationTiming::OnChange,
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = get_config_dir().display().to_string();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}",
        env!("CARGO_PKG_VERSION")
    )
}
