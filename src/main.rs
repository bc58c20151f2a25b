mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod web;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::dispatch::{self as dispatch_cmd, AssignArgs};
use crate::config::{AppConfig, parse_bind};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::agidesk::AgideskClient;

#[derive(Parser)]
#[command(
    name = "dispatch",
    author,
    version,
    about = "Helpdesk dispatch board for unassigned Agidesk tickets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dispatch dashboard and its JSON API.
    Serve(ServeArgs),
    /// List the team's unassigned tickets.
    Tickets,
    /// List tracked technicians with their open-ticket counts.
    Technicians,
    /// Assign a ticket to a technician.
    Assign(AssignArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Override the listen address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Serve(args) => {
            let mut ctx = build_context()?;
            if let Some(bind) = args.bind {
                ctx.config.bind = parse_bind(&bind)?;
            }
            web::serve(ctx).await
        }
        Commands::Tickets => dispatch_cmd::run_tickets(&build_context()?).await,
        Commands::Technicians => dispatch_cmd::run_technicians(&build_context()?).await,
        Commands::Assign(args) => dispatch_cmd::run_assign(&build_context()?, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;

    if config.api_key.is_none() {
        warn!("API_KEY not configured; helpdesk requests will fail.");
    }

    let helpdesk = Arc::new(AgideskClient::new(&config)?);
    Ok(AppContext::new(config, helpdesk))
}
