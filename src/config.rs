use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "browser.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    /// Base URL of the data service, e.g. `http://localhost:5000/api`.
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub max_workers: usize,
    pub session_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            service_url: "http://localhost:5000/api".into(),
            request_timeout_secs: 15,
            max_workers: 8,
            session_ttl_secs: 60 * 60 * 12,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    bind_addr: Option<String>,
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
    max_workers: Option<usize>,
    session_ttl_secs: Option<u64>,
}

/// Defaults, then `browser.toml` (or the file named by `APP__CONFIG`) when it
/// exists, then `APP__*` environment variables.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = std::env::var("APP__CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut settings = Settings::default();

    if Path::new(&path).exists() {
        apply_file(&mut settings, &path)?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok())?;

    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &str) -> Result<(), ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    apply_toml(settings, &raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn apply_toml(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file.max_workers {
        settings.max_workers = v;
    }
    if let Some(v) = file.session_ttl_secs {
        settings.session_ttl_secs = v;
    }
    Ok(())
}

fn apply_env<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = lookup("APP__SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_number("APP__REQUEST_TIMEOUT_SECS", v)?;
    }
    if let Some(v) = lookup("APP__MAX_WORKERS") {
        settings.max_workers = parse_number("APP__MAX_WORKERS", v)?;
    }
    if let Some(v) = lookup("APP__SESSION_TTL_SECS") {
        settings.session_ttl_secs = parse_number("APP__SESSION_TTL_SECS", v)?;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
