use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use mailkit_common::{MailTo, text::is_valid_email_address};

use crate::config::Config;

/// Compose mailto: links and check email addresses
#[derive(Parser, Debug)]
#[command(name = "mailkit")]
#[command(about = "Compose mailto: links and check email addresses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a RON config file (overrides MAILKIT_CONFIG and the default locations)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a mailto: URI
    Compose {
        /// Recipient address (repeatable; defaults to the configured recipients)
        #[arg(short, long = "to")]
        to: Vec<String>,

        /// Carbon-copy address (repeatable; defaults to the configured cc list)
        #[arg(long)]
        cc: Vec<String>,

        /// Subject line
        #[arg(short, long)]
        subject: Option<String>,

        /// Message body
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the message body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Check whether addresses are syntactically valid
    Check {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

/// What a command printed and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub success: bool,
}

/// Runs `command` against `config`.
///
/// # Errors
///
/// Fails if there are no recipients, an address or field is rejected, or the
/// body file cannot be read.
pub fn run(command: &Commands, config: &Config) -> anyhow::Result<Report> {
    match command {
        Commands::Compose {
            to,
            cc,
            subject,
            body,
            body_file,
        } => {
            let body = match body_file {
                Some(path) => Some(
                    std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read body from {}", path.display()))?,
                ),
                None => body.clone(),
            };

            let uri = compose(
                config,
                pick(to, &config.recipients),
                pick(cc, &config.cc),
                subject.as_deref(),
                body.as_deref(),
            )?;

            Ok(Report {
                output: uri,
                success: true,
            })
        }
        Commands::Check { addresses } => Ok(check(addresses)),
    }
}

fn pick<'a>(given: &'a [String], configured: &'a [String]) -> &'a [String] {
    if given.is_empty() { configured } else { given }
}

fn compose(
    config: &Config,
    to: &[String],
    cc: &[String],
    subject: Option<&str>,
    body: Option<&str>,
) -> anyhow::Result<String> {
    let Some((main, additional)) = to.split_first() else {
        bail!("No recipients given; pass --to or set `recipients` in the config file");
    };

    let mut mail_to = MailTo::with_limits(config.limits, main, additional)?;
    if let Some((first, additional)) = cc.split_first() {
        mail_to.cc(first, additional)?;
    }
    if let Some(subject) = subject {
        mail_to.subject(subject)?;
    }
    if let Some(body) = body {
        mail_to.body(body)?;
    }

    Ok(mail_to.build()?.into_string())
}

fn check(addresses: &[String]) -> Report {
    let mut success = true;
    let output = addresses
        .iter()
        .map(|address| {
            let valid = is_valid_email_address(address);
            success &= valid;
            format!("{address}: {}", if valid { "valid" } else { "invalid" })
        })
        .collect::<Vec<_>>()
        .join("\n");

    Report { output, success }
}
