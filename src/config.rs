use std::fs;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// The Price List API itself is only served from a few regions.
pub const DEFAULT_API_REGION: &str = "us-east-1";
pub const DEFAULT_PRICE_REGION: &str = "ap-northeast-1";

/// `~/.config/apf/config.toml`. Every key is optional; CLI flags and
/// environment variables win over it.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub mongo_uri: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,
    pub price_region: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_in_flight: Option<usize>,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn parse_config(data: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(data)
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "apf") else {
        return Config::default();
    };

    let path = dirs.config_dir().join("config.toml");
    let Ok(data) = fs::read_to_string(&path) else {
        return Config::default();
    };

    match parse_config(&data) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        }
    }
}
