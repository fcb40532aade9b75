//! CivicLens CLI: the `civiclens` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civiclens=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { command } => commands::user::run(command),

        Commands::Issue { command } => commands::issue::run(command),

        Commands::Notifications { command } => commands::notifications::run(command),

        Commands::Leaderboard { limit, state, json } => {
            commands::leaderboard::run(limit, state, json)
        }

        Commands::Check { state, json } => commands::check::run(state, json),
    }
}
