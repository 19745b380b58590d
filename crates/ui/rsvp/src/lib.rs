pub mod action;
pub mod app;
pub mod check;
pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod logging;
pub mod theme;
pub mod tui;

use std::process::ExitCode;

use color_eyre::Result;

use crate::{
    app::App,
    cli::{Cli, Cmd},
    config::Config,
    theme::Theme,
};

/// Entry point shared by the binary: install hooks, load configuration and
/// run the chosen command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    crate::errors::init()?;
    crate::logging::init()?;

    let config = Config::new()?;
    let profile = config.resolve_profile(&cli.form);

    match &cli.cmd {
        Some(Cmd::Check(args)) => {
            let valid = check::run(profile, args, std::io::stdout().lock())?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Cmd::Run) | None => {
            let theme = Theme::from_config(config.ui.color_mode.as_deref());
            let mut app = App::new(
                profile,
                theme,
                config.tick_rate(&cli),
                config.frame_rate(&cli),
            );
            app.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
