use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::load()?;

    println!("Agidesk base URL: {}", cfg.base_url);
    println!("Agidesk API key: {}", mask_secret(&cfg.api_key));
    println!("Tenant: {}", cfg.tenant);
    println!("Team: {}", cfg.team_id);
    println!("Technicians: {}", format_ids(&cfg.technicians));
    println!(
        "Request timeout: {}",
        cfg.request_timeout
            .map(|timeout| format!("{}s", timeout.as_secs()))
            .unwrap_or_else(|| "<client default>".to_string())
    );
    println!("Listen address: {}", cfg.bind);
    println!("Dashboard page: {}", cfg.index_path.display());

    Ok(())
}

fn format_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
