//! Address → coordinate resolution with a process-wide cache and a global
//! pacing limiter.
//!
//! The external service is a shared public endpoint, so the resolver never
//! dispatches two requests closer together than the configured pacing
//! interval, no matter how many callers resolve concurrently. Lookups that
//! fail — transport errors, non-2xx, empty candidate lists, unparsable
//! coordinates — are cached as negative results and not retried for the
//! lifetime of the `Resolver`.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use bessdb_core::premise::collapse_lines;
use bessdb_core::LatLng;

use crate::error::GeocodeError;

/// One candidate in the search response; the service returns coordinates as
/// decimal strings.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
}

/// Owned geocoding resource: HTTP client, result cache, and the
/// last-dispatch timestamp that enforces pacing.
///
/// Share one `Resolver` per process (behind an `Arc` if needed) so repeated
/// searches over overlapping viewports stay cache-hits. Cache entries are
/// write-once: a given normalized address is resolved at most once.
pub struct Resolver {
    client: reqwest::Client,
    base_url: String,
    country: String,
    pacing: Duration,
    /// Normalized address → coordinates, with `None` marking a lookup that
    /// already failed (distinct from "not yet attempted" = absent key).
    cache: Mutex<HashMap<String, Option<LatLng>>>,
    /// Instant of the most recent dispatch. Held across the pacing sleep and
    /// the dispatch itself, which both serializes lookups and closes the
    /// window where two first-time callers could dispatch for one address.
    last_dispatch: Mutex<Option<Instant>>,
}

impl Resolver {
    /// Creates a `Resolver` against a Nominatim-compatible `/search` URL.
    ///
    /// `country` restricts candidates (`countrycodes=` parameter) and
    /// `pacing_ms` is the minimum interval between dispatched requests.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        country: &str,
        user_agent: &str,
        timeout_secs: u64,
        pacing_ms: u64,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_owned(),
            country: country.to_owned(),
            pacing: Duration::from_millis(pacing_ms),
            cache: Mutex::new(HashMap::new()),
            last_dispatch: Mutex::new(None),
        })
    }

    /// Resolves a free-text address to coordinates.
    ///
    /// Cache hits — positive or negative — return immediately without
    /// touching the limiter. A miss waits out the remainder of the pacing
    /// interval, dispatches exactly one lookup, and caches the outcome.
    /// Failures are absorbed into a negative entry; callers only see
    /// `None`.
    pub async fn resolve(&self, address: &str) -> Option<LatLng> {
        let key = cache_key(address);
        if let Some(cached) = self.cache.lock().await.get(&key) {
            return *cached;
        }

        let mut last_dispatch = self.last_dispatch.lock().await;
        // Another caller may have resolved this address while we waited for
        // the dispatch lock.
        if let Some(cached) = self.cache.lock().await.get(&key) {
            return *cached;
        }

        if let Some(last) = *last_dispatch {
            // Computed remainder, not a poll loop; a no-op when the
            // interval has already elapsed.
            tokio::time::sleep_until(last + self.pacing).await;
        }
        *last_dispatch = Some(Instant::now());

        let resolved = match self.lookup(address).await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::debug!(error = %err, "geocode lookup failed; caching negative result");
                None
            }
        };
        self.cache.lock().await.insert(key, resolved);
        resolved
    }

    /// Dispatches one search request and extracts the first candidate.
    ///
    /// `Ok(None)` means the service answered with no candidates; errors
    /// cover transport, status, and parse failures. Both cache as negative.
    async fn lookup(&self, address: &str) -> Result<Option<LatLng>, GeocodeError> {
        let query = collapse_lines(address);
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("format", "json"),
                ("q", query.as_str()),
                ("countrycodes", self.country.as_str()),
                ("limit", "1"),
            ],
        )
        .map_err(|e| GeocodeError::InvalidQueryUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let candidates: Vec<Candidate> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize { source: e })?;

        let Some(first) = candidates.first() else {
            return Ok(None);
        };
        let lat = parse_coordinate(&first.lat)?;
        let lng = parse_coordinate(&first.lon)?;
        Ok(Some(LatLng::new(lat, lng)))
    }
}

fn parse_coordinate(value: &str) -> Result<f64, GeocodeError> {
    value
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidCoordinate {
            value: value.to_owned(),
        })
}

/// Normalized cache key: lower-cased, trimmed, with line breaks and runs of
/// whitespace collapsed to single spaces. Addresses differing only in letter
/// case or embedded newlines share one entry.
fn cache_key(address: &str) -> String {
    address
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
