use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/storage.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(env::var("PORT").ok()),
            data_path: resolve_data_path(env::var("APP_DATA_PATH").ok()),
        }
    }
}

fn resolve_port(value: Option<String>) -> u16 {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("invalid PORT value {raw:?} ({err}), using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

fn resolve_data_path(value: Option<String>) -> PathBuf {
    value
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}
