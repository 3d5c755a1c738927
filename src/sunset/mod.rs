pub mod models;

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use tracing::{debug, info};

use crate::{clock::HubClock, config::SunsetConfig, db::models::is_leap_second};

use self::models::SunResponse;

#[derive(Debug, thiserror::Error)]
pub enum SunsetError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Upstream(String),

    #[error("unparsable sunset time {0:?}")]
    BadTime(String),
}

/// Source of today's sunset time for the hub's location.
pub trait SunsetResolver {
    fn sunset(&self) -> impl Future<Output = Result<NaiveTime, SunsetError>> + Send;
}

// ---------------------------------------------------------------------------
// SunsetClient
// ---------------------------------------------------------------------------

/// HTTP client for a sunrisesunset.io-compatible lookup.
///
/// One outbound request per call: no caching, no retry.
#[derive(Debug, Clone)]
pub struct SunsetClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: Client,
    config: SunsetConfig,
    clock: HubClock,
}

impl SunsetClient {
    /// `clock` supplies both "today" and the timezone named in the lookup.
    pub fn new(config: &SunsetConfig, clock: HubClock) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build sunset HTTP client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config: config.clone(),
                clock,
            }),
        })
    }

    fn lookup_url(&self, date: NaiveDate) -> String {
        let c = &self.inner.config;
        format!(
            "{}?lat={}&lng={}&timezone={}&date={}&time_format=24",
            c.api_url,
            c.latitude,
            c.longitude,
            self.inner.clock.timezone(),
            date.format("%Y-%m-%d"),
        )
    }

    /// Sunset time at the configured location on `date`.
    pub async fn sunset_on(&self, date: NaiveDate) -> Result<NaiveTime, SunsetError> {
        let url = self.lookup_url(date);
        debug!(url = %url, "Requesting sunset time");

        let resp = self
            .inner
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<SunResponse>()
            .await?;

        let results = resp.into_result().map_err(SunsetError::Upstream)?;
        let sunset = NaiveTime::parse_from_str(&results.sunset, "%H:%M:%S")
            .ok()
            .filter(|t| !is_leap_second(*t))
            .ok_or_else(|| SunsetError::BadTime(results.sunset.clone()))?;

        info!(date = %date, sunset = %sunset, "Resolved sunset time");
        Ok(sunset)
    }
}

impl SunsetResolver for SunsetClient {
    async fn sunset(&self) -> Result<NaiveTime, SunsetError> {
        self.sunset_on(self.inner.clock.today()).await
    }
}
