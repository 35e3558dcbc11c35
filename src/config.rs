//! Configuration loader and validator for the movie client.
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub app: App,
    pub itunes: Itunes,
    pub home: Home,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    pub data_dir: String,
}

/// iTunes Search API endpoint and connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Itunes {
    pub base_url: String,
    /// `host:port` opened before each request to detect missing connectivity.
    pub reachability_probe: String,
    pub probe_timeout_ms: u64,
}

/// Home screen defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Home {
    /// Genre browsed while the search keyword is empty.
    pub default_genre: String,
    pub limit: u32,
    pub column: u8,
}

impl App {
    /// `data_dir` with a leading `~/` expanded to `$HOME`.
    pub fn resolved_data_dir(&self) -> String {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => match std::env::var("HOME") {
                Ok(home) => format!("{}/{}", home.trim_end_matches('/'), rest),
                Err(_) => self.data_dir.clone(),
            },
            None => self.data_dir.clone(),
        }
    }
}

impl Itunes {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Config {
    /// Ensure required directories exist (creates `app.data_dir` if missing).
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        let dir = self.app.resolved_data_dir();
        if dir.trim().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(dir)
    }

    /// SQLite URL of the favorites store; `DATABASE_URL` takes precedence.
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!("sqlite://{}/favorites.db", self.app.resolved_data_dir())
        })
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.data_dir.trim().is_empty() {
        return Err(ConfigError::Invalid("app.data_dir must be non-empty"));
    }

    match Url::parse(&cfg.itunes.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => {
            return Err(ConfigError::Invalid(
                "itunes.base_url must be an http(s) URL",
            ))
        }
    }
    if cfg.itunes.reachability_probe.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "itunes.reachability_probe must be non-empty",
        ));
    }
    if cfg.itunes.probe_timeout_ms == 0 {
        return Err(ConfigError::Invalid("itunes.probe_timeout_ms must be > 0"));
    }

    // The Search API caps `limit` at 200.
    if cfg.home.limit == 0 || cfg.home.limit > 200 {
        return Err(ConfigError::Invalid("home.limit must be within 1..=200"));
    }
    if cfg.home.column != 2 && cfg.home.column != 3 {
        return Err(ConfigError::Invalid("home.column must be 2 or 3"));
    }

    Ok(())
}

/// Returns the example YAML content shipped as `config.yaml`.
pub fn example() -> &'static str {
    r#"app:
  data_dir: "./data"

itunes:
  base_url: "https://itunes.apple.com"
  reachability_probe: "itunes.apple.com:443"
  probe_timeout_ms: 1500

home:
  default_genre: "Action"
  limit: 50
  column: 2
"#
}
