/// Runtime configuration, resolved from environment variables with defaults
/// suitable for the public Malaysian feeds.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Certified-premises CSV feed (positional columns).
    pub premises_feed_url: String,
    /// Health-facility CSV feed (header-driven columns).
    pub facilities_feed_url: String,
    /// Address-search endpoint (Nominatim-compatible `/search`).
    pub geocoder_url: String,
    /// ISO country code passed to the geocoder to restrict candidates.
    pub geocode_country: String,
    /// Client identifier sent as `User-Agent` on all outbound requests.
    pub user_agent: String,
    /// Minimum interval between dispatched geocoding requests.
    pub geocode_pacing_ms: u64,
    /// Bound on every outbound HTTP request.
    pub request_timeout_secs: u64,
    /// Cap on candidates geocoded per area search.
    pub max_candidates: usize,
    /// Records per page in directory listings.
    pub page_size: usize,
    /// Quiet period before a typed search query is applied.
    pub debounce_ms: u64,
    pub log_level: String,
}
