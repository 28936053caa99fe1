use std::process::ExitCode;

use anyhow::Context;
use ask_db::error::DatabaseError;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

/// Exit status for a lookup or resolution of a question that does not exist.
const EXIT_NOT_FOUND: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match not_found(&error) {
            Some((entity, id)) => {
                eprintln!("askb: no such {entity}: {id}");
                ExitCode::from(EXIT_NOT_FOUND)
            }
            None => {
                eprintln!("askb error: {error:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config(cli.db.as_deref())?;
    let flags = cli.global_flags(&config)?;
    ui::init(&flags);

    let ctx = context::AppContext::init(&config)
        .await
        .context("failed to initialize askboard application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ASKBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Entity and id of a `NotFound` anywhere in the error chain.
fn not_found(error: &anyhow::Error) -> Option<(&'static str, &str)> {
    error
        .chain()
        .find_map(|cause| match cause.downcast_ref::<DatabaseError>() {
            Some(DatabaseError::NotFound { entity, id }) => Some((*entity, id.as_str())),
            _ => None,
        })
}
