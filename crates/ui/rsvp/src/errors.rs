use std::{panic::PanicHookInfo, sync::OnceLock};

use color_eyre::{Result, config::PanicHook};
use tracing::error;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and the panic hook. Later calls are no-ops.
pub fn init() -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    // try_into_hooks: a theme set by an earlier caller is not a panic
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "Esto es un error del programa. Repórtelo en {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INSTALLED.set(());
    Ok(())
}

fn on_panic(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    // The report is unreadable inside the alternate screen.
    if let Err(err) = crate::tui::restore() {
        error!("unable to restore the terminal: {err:?}");
    }

    let report = panic_hook.panic_report(info).to_string();
    error!(target: "rsvp::panic", "{}", plain(&report));

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        // Nothing left to propagate to from inside the hook.
        let _ = print_msg(dump, &metadata);
        eprintln!("{report}");
    }

    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);

    std::process::exit(libc::EXIT_FAILURE);
}

/// Panic reports go to the log file without terminal colors.
fn plain(report: &str) -> String {
    strip_ansi_escapes::strip_str(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_copy_has_no_color_codes() {
        assert_eq!(plain("\u{1b}[31mboom\u{1b}[0m at form.rs"), "boom at form.rs");
    }
}
