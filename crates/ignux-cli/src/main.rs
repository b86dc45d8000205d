//! IGNUX CLI - talk to the events backend from the terminal
//!
//! Content commands work against a local cache and only reach the content
//! API when one is configured.

mod cli;
mod commands;
mod config;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::booking::run_booking;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::contact::{run_contact, run_quote, run_whatsapp};
use crate::commands::content::run_content;
use crate::commands::newsletter::run_newsletter;
use crate::commands::services::run_services;
use crate::commands::testimonials::run_testimonials;
use crate::config::Settings;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "ignux=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let settings = Settings::load(&cli.global)?;

    match cli.command {
        Commands::Content { command } => run_content(command, &settings).await?,
        Commands::Contact { command } => run_contact(command, &settings).await?,
        Commands::Quote(args) => run_quote(args, &settings).await?,
        Commands::Whatsapp {
            phone,
            message,
            template,
        } => run_whatsapp(phone, message, template, &settings).await?,
        Commands::Booking { command } => run_booking(command, &settings).await?,
        Commands::Services { command } => run_services(command, &settings).await?,
        Commands::Testimonials { command } => run_testimonials(command, &settings).await?,
        Commands::Newsletter { command } => run_newsletter(command, &settings).await?,
        Commands::Config { command } => run_config(command, &settings)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
