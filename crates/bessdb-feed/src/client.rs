//! HTTP client for the public CSV feeds.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;

use bessdb_core::{FacilityRecord, PremiseRecord};

use crate::error::FeedError;
use crate::parse::{parse_facilities, parse_premises};

/// Fetches the certified-premises and health-facility feeds.
///
/// Feed-level failures (transport, non-2xx, unreadable CSV) surface as
/// [`FeedError`]; there is no retry and no partial-data fallback.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches and parses the certified-premises feed. Derived fields are
    /// computed against `today`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] — transport failure.
    /// - [`FeedError::UnexpectedStatus`] — non-2xx response.
    /// - [`FeedError::Csv`] — body is not readable as CSV.
    pub async fn fetch_premises(
        &self,
        url: &str,
        today: NaiveDate,
    ) -> Result<Vec<PremiseRecord>, FeedError> {
        let body = self.fetch_text(url).await?;
        parse_premises(&body, today)
    }

    /// Fetches and parses the health-facility feed.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`FeedClient::fetch_premises`].
    pub async fn fetch_facilities(&self, url: &str) -> Result<Vec<FacilityRecord>, FeedError> {
        let body = self.fetch_text(url).await?;
        parse_facilities(&body)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
