use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://grendene.agidesk.com";
pub const DEFAULT_TENANT: &str = "grendene";
pub const DEFAULT_TEAM_ID: u64 = 14;
pub const DEFAULT_TECHNICIANS: [u64; 10] = [
    7304, 876, 5207, 13132, 18848, 18823, 16740, 1241, 7957, 3637,
];
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_INDEX: &str = "static/index.html";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub tenant: String,
    pub team_id: u64,
    /// Technician IDs in the order the dashboard lists them.
    pub technicians: Vec<u64>,
    pub request_timeout: Option<Duration>,
    pub bind: SocketAddr,
    pub index_path: PathBuf,
}

impl AppConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let team_id = match value("AGIDESK_TEAM_ID") {
            Some(raw) => parse_number("AGIDESK_TEAM_ID", &raw)?,
            None => DEFAULT_TEAM_ID,
        };

        let technicians = match value("AGIDESK_TECHNICIANS") {
            Some(raw) => parse_technicians(&raw)?,
            None => DEFAULT_TECHNICIANS.to_vec(),
        };

        let request_timeout = value("AGIDESK_TIMEOUT_SECS")
            .map(|raw| parse_number("AGIDESK_TIMEOUT_SECS", &raw).map(Duration::from_secs))
            .transpose()?;

        let bind_raw = value("DISPATCH_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = parse_bind(&bind_raw)?;

        Ok(Self {
            api_key: value("API_KEY"),
            base_url: value("API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            tenant: value("AGIDESK_TENANT").unwrap_or_else(|| DEFAULT_TENANT.to_string()),
            team_id,
            technicians,
            request_timeout,
            bind,
            index_path: value("DISPATCH_INDEX")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX)),
        })
    }
}

pub fn parse_bind(raw: &str) -> AppResult<SocketAddr> {
    raw.parse()
        .map_err(|err| AppError::Configuration(format!("invalid bind address '{raw}': {err}")))
}

fn parse_number(key: &str, raw: &str) -> AppResult<u64> {
    match raw.parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(AppError::Configuration(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

fn parse_technicians(raw: &str) -> AppResult<Vec<u64>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_number("AGIDESK_TECHNICIANS", part))
        .collect::<AppResult<Vec<_>>>()?;

    if ids.is_empty() {
        return Err(AppError::Configuration(
            "AGIDESK_TECHNICIANS must list at least one technician".to_string(),
        ));
    }
    Ok(ids)
}
