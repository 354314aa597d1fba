use std::process::ExitCode;

use clap::Parser;
use mailkit::{Cli, Config};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    mailkit_common::logging::init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover()?,
    };

    let report = mailkit::run(&cli.command, &config)?;
    println!("{}", report.output);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
