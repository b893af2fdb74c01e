use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};

pub const DEFAULT_WEATHER_API_BASE: &str = "http://api.openweathermap.org";
pub const DEFAULT_SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Clone)]
pub struct Config {
    pub weather_api_key: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub weather_api_base: Url,
    pub spotify_accounts_base: Url,
    pub spotify_api_base: Url,
    pub request_timeout: Duration,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let weather_api_key = std::env::var("WEATHER_API_KEY")
            .map_err(|_| AppError::Config("WEATHER_API_KEY not set".into()))?;

        let spotify_client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_ID not set".into()))?;

        let spotify_client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_SECRET not set".into()))?;

        let weather_api_base = base_url_from_env("WEATHER_API_BASE", DEFAULT_WEATHER_API_BASE)?;
        let spotify_accounts_base =
            base_url_from_env("SPOTIFY_ACCOUNTS_BASE", DEFAULT_SPOTIFY_ACCOUNTS_BASE)?;
        let spotify_api_base = base_url_from_env("SPOTIFY_API_BASE", DEFAULT_SPOTIFY_API_BASE)?;

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            weather_api_key,
            spotify_client_id,
            spotify_client_secret,
            weather_api_base,
            spotify_accounts_base,
            spotify_api_base,
            request_timeout,
            bind_addr,
        })
    }

    /// Build a config with the production endpoints and the given secrets.
    pub fn new(
        weather_api_key: impl Into<String>,
        spotify_client_id: impl Into<String>,
        spotify_client_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            weather_api_key: weather_api_key.into(),
            spotify_client_id: spotify_client_id.into(),
            spotify_client_secret: spotify_client_secret.into(),
            weather_api_base: parse_base_url("WEATHER_API_BASE", DEFAULT_WEATHER_API_BASE)?,
            spotify_accounts_base: parse_base_url(
                "SPOTIFY_ACCOUNTS_BASE",
                DEFAULT_SPOTIFY_ACCOUNTS_BASE,
            )?,
            spotify_api_base: parse_base_url("SPOTIFY_API_BASE", DEFAULT_SPOTIFY_API_BASE)?,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        })
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.weather_api_key.is_empty() {
            missing.push("WEATHER_API_KEY".to_string());
        }
        if self.spotify_client_id.is_empty() {
            missing.push("SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify_client_secret.is_empty() {
            missing.push("SPOTIFY_CLIENT_SECRET".to_string());
        }

        missing
    }

    /// Shared HTTP client for both providers, with the per-request timeout applied.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(concat!("weathertunes/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

// Secrets never show up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("weather_api_key", &redact(&self.weather_api_key))
            .field("spotify_client_id", &redact(&self.spotify_client_id))
            .field("spotify_client_secret", &redact(&self.spotify_client_secret))
            .field("weather_api_base", &self.weather_api_base.as_str())
            .field("spotify_accounts_base", &self.spotify_accounts_base.as_str())
            .field("spotify_api_base", &self.spotify_api_base.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "<unset>" } else { "<redacted>" }
}

/// Whole seconds, at least one.
pub(crate) fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        AppError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
    })?;

    if secs == 0 {
        return Err(AppError::Config(
            "REQUEST_TIMEOUT_SECS must be at least 1".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

fn base_url_from_env(var: &str, default: &str) -> Result<Url> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

pub(crate) fn parse_base_url(var: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Config(format!("{} is not a valid URL ({}): {}", var, raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "{} must be an http(s) URL, got {}",
            var, raw
        )));
    }

    Ok(url)
}

/// Append `path` to `base`, keeping any path prefix the base already has.
pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}
