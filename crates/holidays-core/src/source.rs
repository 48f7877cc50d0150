//! Upstream holiday source
//!
//! `HolidaySource` is the only seam between the aggregator and the outside
//! world. `HttpHolidaySource` implements it against a Nager.Date style
//! endpoint (`{base_url}/{year}/{countryCode}`):
//! - 2xx with a JSON array: decoded, entries without a valid date dropped
//! - 2xx with an empty body, or any non-2xx status: no holidays
//! - transport, timeout or decoding failure: `Error::UpstreamUnavailable`
//!
//! Every call is a single fresh request. There is no retry and no cache.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use tracing::{debug, error, warn};

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::model::{Holiday, decode_holidays};

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3/PublicHolidays";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Provider of per-country, per-year holiday lists
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetch the holidays of `country_code` for `year`
    async fn fetch(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>>;
}

/// HTTP client for the upstream holiday provider
#[derive(Clone)]
pub struct HttpHolidaySource {
    http_client: HttpClient,
    base_url: String,
    endpoint: Url,
}

impl std::fmt::Debug for HttpHolidaySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHolidaySource")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for creating an HttpHolidaySource
pub struct HttpHolidaySourceBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for HttpHolidaySourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpHolidaySourceBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
        }
    }

    /// Set the base URL (defaults to Nager.Date)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<HttpHolidaySource> {
        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::ConfigError(
                "Upstream timeout must be greater than zero".to_string(),
            ));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(Error::ConfigError("Upstream base URL is empty".to_string()));
        }
        let endpoint = Url::parse(&base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid upstream base URL '{}': {}", base_url, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Upstream base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::upstream("Failed to build HTTP client", e))?;

        Ok(HttpHolidaySource {
            http_client,
            base_url,
            endpoint,
        })
    }
}

impl HttpHolidaySource {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        HttpHolidaySourceBuilder::new()
            .base_url(config.base_url.clone())
            .timeout_secs(config.timeout_secs)
            .build()
    }

    pub fn builder() -> HttpHolidaySourceBuilder {
        HttpHolidaySourceBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{year}/{countryCode}`, each value encoded as exactly one path segment
    fn url_for(&self, year: i32, country_code: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("Upstream base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(&year.to_string())
            .push(country_code);
        Ok(url)
    }
}

/// Country codes are plain ASCII letters and digits (e.g. `US`, `GB`)
pub fn is_valid_country_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>> {
        if !is_valid_country_code(country_code) {
            return Err(Error::InvalidInput(format!(
                "Country code '{}' must contain only ASCII letters and digits",
                country_code
            )));
        }

        let url = self.url_for(year, country_code)?;
        debug!(url = %url, "Fetching holidays");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            error!(country = country_code, year, error = %e, "Error fetching holidays");
            Error::upstream("Failed to fetch holidays from external service", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                country = country_code,
                year,
                status = status.as_u16(),
                "No holidays found or failed to fetch holidays"
            );
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(|e| {
            error!(country = country_code, year, error = %e, "Error reading holiday response");
            Error::upstream("Failed to read holiday response", e)
        })?;

        let holidays = decode_holidays(&body).map_err(|e| {
            error!(country = country_code, year, error = %e, "Malformed holiday response");
            Error::upstream_message(format!("Malformed holiday response: {}", e))
        })?;

        if holidays.is_empty() {
            warn!(country = country_code, year, "Upstream returned no holidays");
        }

        debug!(country = country_code, year, count = holidays.len(), "Fetched holidays");
        Ok(holidays)
    }
}
