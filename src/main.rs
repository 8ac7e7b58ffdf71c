//! xspf-export - Export a playlist library to XSPF files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod export;
mod library;
mod utils;
mod xspf;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "xspf_export=debug"
    } else {
        "xspf_export=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export {
            input,
            dest,
            flat,
            folders,
            dry_run,
        } => {
            cli::commands::export(input, dest, flat, folders, dry_run).await?;
        }
        Commands::Tree { input } => {
            cli::commands::tree(input)?;
        }
        Commands::Show { file } => {
            cli::commands::show(&file)?;
        }
        Commands::Config { dest, flat } => {
            cli::commands::config(dest, flat)?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
