//! Notes CLI - command-line client for a notes server
//!
//! Signs in, manages notes and exports them as PDF from the terminal, and
//! keeps the recent-notes widget snapshot up to date along the way.

mod cli;
mod commands;
mod config;
mod error;
mod secret_store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::widget::run_widget;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "notes=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let api_url = cli.api_url;

    match cli.command {
        Commands::Auth { command } => run_auth(command, api_url).await?,
        Commands::List { limit, query, json } => {
            run_list(limit, query.as_deref(), json, api_url).await?;
        }
        Commands::Add { title, content } => run_add(&title, &content, api_url).await?,
        Commands::Edit { id, title, content } => {
            run_edit(id, title.as_deref(), content.as_deref(), api_url).await?;
        }
        Commands::Delete { id } => run_delete(id, api_url).await?,
        Commands::Export { id, open_url } => run_export(id, open_url, api_url).await?,
        Commands::Widget { size, json } => run_widget(size, json, api_url)?,
        Commands::Config { command } => run_config(command, api_url)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_LOG_DIRECTIVE.parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
