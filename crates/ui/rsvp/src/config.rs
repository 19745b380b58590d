use std::{env, path::Path, path::PathBuf};

use color_eyre::Result;
use directories::ProjectDirs;
use form::{EmailStrictness, FormOptions, FormProfile, FormVariant, ValidationTiming};
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::{Cli, FormArgs};

pub const DEFAULT_TICK_RATE: f64 = 4.0;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// `[form]` section. Every key is optional and overrides the variant preset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FormConfig {
    pub variant: Option<FormVariant>,
    pub email_strictness: Option<EmailStrictness>,
    pub validation_timing: Option<ValidationTiming>,
    pub gate_submit: Option<bool>,
}

/// `[ui]` section.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UiConfig {
    pub tick_rate: Option<f64>,
    pub frame_rate: Option<f64>,
    /// `auto`, `truecolor`, `256` or `16`.
    pub color_mode: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.toml", config::FileFormat::Toml),
];

impl Config {
    /// Load from the standard config directory.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_dir(&get_config_dir())
    }

    /// Load `config.json5` / `config.toml` from `config_dir`. Missing files are
    /// fine; every value has a default.
    pub fn from_dir(config_dir: &Path) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().into_owned())?
            .set_default("config_dir", config_dir.to_string_lossy().into_owned())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            let source = config::File::from(path.clone())
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if path.exists() {
                info!(path = %path.display(), "loading configuration");
                found_config = true
            }
        }
        if !found_config {
            warn!(
                dir = %config_dir.display(),
                "no configuration file found, using variant defaults"
            );
        }

        builder.build()?.try_deserialize()
    }

    /// Layer variant preset < config file < command line into one profile.
    pub fn resolve_profile(&self, args: &FormArgs) -> FormProfile {
        let variant = args
            .variant
            .map(FormVariant::from)
            .or(self.form.variant)
            .unwrap_or_default();
        let profile = variant.profile();
        let preset = profile.options;

        let options = FormOptions {
            email_strictness: args
                .email_strictness
                .map(EmailStrictness::from)
                .or(self.form.email_strictness)
                .unwrap_or(preset.email_strictness),
            validation_timing: args
                .validation_timing
                .map(ValidationTiming::from)
                .or(self.form.validation_timing)
                .unwrap_or(preset.validation_timing),
            gate_submit: args
                .gate_submit
                .or(self.form.gate_submit)
                .unwrap_or(preset.gate_submit),
        };
        profile.with_options(options)
    }

    pub fn tick_rate(&self, cli: &Cli) -> f64 {
        positive(cli.tick_rate.or(self.ui.tick_rate)).unwrap_or(DEFAULT_TICK_RATE)
    }

    pub fn frame_rate(&self, cli: &Cli) -> f64 {
        positive(cli.frame_rate.or(self.ui.frame_rate)).unwrap_or(DEFAULT_FRAME_RATE)
    }
}

fn positive(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "forge-of-stories", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{StrictnessArg, VariantArg};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("rsvp_config_test_{name}_{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = unique_temp_dir("empty");
        let cfg = Config::from_dir(&dir).expect("defaults");
        assert_eq!(cfg.form, FormConfig::default());
        assert_eq!(cfg.config.config_dir, dir);

        let profile = cfg.resolve_profile(&FormArgs::default());
        assert_eq!(profile, FormVariant::GuestPass.profile());
    }

    #[test]
    fn toml_file_overrides_preset() {
        let dir = unique_temp_dir("toml");
        fs::write(
            dir.join("config.toml"),
            "[form]\nvariant = \"workshop\"\ngate_submit = false\n\n[ui]\ntick_rate = 8.0\n",
        )
        .unwrap();

        let cfg = Config::from_dir(&dir).expect("parse toml");
        let profile = cfg.resolve_profile(&FormArgs::default());
        assert_eq!(profile.variant, FormVariant::Workshop);
        assert_eq!(profile.options.email_strictness, EmailStrictness::Strict);
        assert!(!profile.options.gate_submit);

        let cli = Cli::try_parse_from(["rsvp"]).unwrap();
        assert_eq!(cfg.tick_rate(&cli), 8.0);
        assert_eq!(cfg.frame_rate(&cli), DEFAULT_FRAME_RATE);
    }

    #[test]
    fn command_line_beats_config_file() {
        let cfg = Config {
            form: FormConfig {
                variant: Some(FormVariant::Workshop),
                email_strictness: Some(EmailStrictness::Strict),
                ..FormConfig::default()
            },
            ..Config::default()
        };
        let args = FormArgs {
            variant: Some(VariantArg::GuestPass),
            email_strictness: Some(StrictnessArg::Loose),
            ..FormArgs::default()
        };
        let profile = cfg.resolve_profile(&args);
        assert_eq!(profile.variant, FormVariant::GuestPass);
        assert_eq!(profile.options.email_strictness, EmailStrictness::Loose);
    }

    #[test]
    fn non_positive_rates_fall_back() {
        let cfg = Config {
            ui: UiConfig {
                tick_rate: Some(0.0),
                frame_rate: Some(f64::NAN),
                color_mode: None,
            },
            ..Config::default()
        };
        let cli = Cli::try_parse_from(["rsvp"]).unwrap();
        assert_eq!(cfg.tick_rate(&cli), DEFAULT_TICK_RATE);
        assert_eq!(cfg.frame_rate(&cli), DEFAULT_FRAME_RATE);
    }
}
