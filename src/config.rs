use anyhow::{anyhow, ensure, Context, Result};
use chrono_tz::Tz;

// ---------------------------------------------------------------------------
// SunsetConfig
// ---------------------------------------------------------------------------

/// Fixed location the hub asks the sunset lookup about.
#[derive(Debug, Clone)]
pub struct SunsetConfig {
    pub api_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timeout_secs: u64,
}

impl Default for SunsetConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.sunrisesunset.io/json".to_owned(),
            latitude: 17.97787,
            longitude: -76.77339,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. `None` runs the hub on the in-memory store.
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    /// Zone used to stamp readings and to pick "today" for the sunset lookup.
    pub timezone: Tz,
    pub sunset: SunsetConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = SunsetConfig::default();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            timezone: parse_timezone(&optional("HUB_TIMEZONE", "UTC"))?,
            sunset: SunsetConfig {
                api_url: optional("SUNSET_API_URL", &defaults.api_url),
                latitude: parse_coordinate(
                    "HUB_LATITUDE",
                    &optional("HUB_LATITUDE", &defaults.latitude.to_string()),
                    90.0,
                )?,
                longitude: parse_coordinate(
                    "HUB_LONGITUDE",
                    &optional("HUB_LONGITUDE", &defaults.longitude.to_string()),
                    180.0,
                )?,
                timeout_secs: parse_timeout(&optional(
                    "SUNSET_TIMEOUT_SECS",
                    &defaults.timeout_secs.to_string(),
                ))?,
            },
        })
    }
}

/// Parse a latitude/longitude and check it lies within `[-limit, limit]`.
fn parse_coordinate(key: &str, raw: &str, limit: f64) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a decimal number, got: {raw:?}"))?;
    ensure!(
        value.is_finite() && (-limit..=limit).contains(&value),
        "{key} must be within [-{limit}, {limit}], got: {value}"
    );
    Ok(value)
}

fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("HUB_TIMEZONE must be an IANA timezone name, got: {raw:?}"))
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs: u64 = raw
        .trim()
        .parse()
        .context("SUNSET_TIMEOUT_SECS must be a positive integer")?;
    ensure!(secs > 0, "SUNSET_TIMEOUT_SECS must be a positive integer");
    Ok(secs)
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
