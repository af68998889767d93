use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_RECENT_LIMIT: usize = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub recent_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            data_path: env::var("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            recent_limit: try_load("DAYBIT_RECENT_LIMIT", DEFAULT_RECENT_LIMIT),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|err| {
            warn!("invalid {key} value {value:?}: {err}, using default {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
