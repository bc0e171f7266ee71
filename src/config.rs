use crate::clock::DEFAULT_TICK;
use crate::quote::DEFAULT_QUOTE_API_URL;
use crate::storage::resolve_data_path;
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub quote_api_url: String,
    pub tick_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, std::io::Error> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let quote_api_url = env::var("QUOTE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_API_URL.to_string());

        let tick_interval = parse_tick(env::var("TICK_INTERVAL_MS").ok().as_deref());

        Ok(Self {
            port,
            data_path: resolve_data_path()?,
            quote_api_url,
            tick_interval,
        })
    }
}

fn parse_tick(value: Option<&str>) -> Duration {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TICK)
}
