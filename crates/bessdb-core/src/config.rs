use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_PREMISES_FEED_URL: &str =
    "https://raw.githubusercontent.com/irfpannn/keracunan/main/Senarai%20Pemegang%20Sijil%20Pengiktirafan%20BeSS_12012026.csv";
const DEFAULT_FACILITIES_FEED_URL: &str =
    "https://raw.githubusercontent.com/MoH-Malaysia/data-resources-public/main/facilities_master.csv";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var fails to parse.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup. Every key has a default;
/// only malformed values are errors.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    Ok(AppConfig {
        premises_feed_url: or_default("BESSDB_PREMISES_FEED_URL", DEFAULT_PREMISES_FEED_URL),
        facilities_feed_url: or_default("BESSDB_FACILITIES_FEED_URL", DEFAULT_FACILITIES_FEED_URL),
        geocoder_url: or_default("BESSDB_GEOCODER_URL", DEFAULT_GEOCODER_URL),
        geocode_country: or_default("BESSDB_GEOCODE_COUNTRY", "my"),
        user_agent: or_default("BESSDB_USER_AGENT", "bessdb/0.1 (food-safety-directory)"),
        geocode_pacing_ms: parse_u64("BESSDB_GEOCODE_PACING_MS", "1100")?,
        request_timeout_secs: parse_u64("BESSDB_REQUEST_TIMEOUT_SECS", "30")?,
        max_candidates: parse_usize("BESSDB_MAX_CANDIDATES", "50")?,
        page_size: parse_usize("BESSDB_PAGE_SIZE", "20")?,
        debounce_ms: parse_u64("BESSDB_DEBOUNCE_MS", "300")?,
        log_level: or_default("BESSDB_LOG_LEVEL", "info"),
    })
}
