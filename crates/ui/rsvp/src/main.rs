use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use rsvp::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    rsvp::run(args).await
}
