//! Certified-premise records and the heuristics that derive their computed
//! fields.
//!
//! The feed is positional CSV with free-text addresses that frequently embed
//! line breaks inside quoted fields. Everything here is pure string/date work
//! so the edge cases stay directly unit-testable; fetching and row iteration
//! live in `bessdb-feed`.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

/// District to report when an address is too short to carry one.
pub const UNKNOWN_DISTRICT: &str = "OTHER";

/// One row of the certified-premises feed, with fields derived at load time.
///
/// `is_active` and `district` are computed once against the load-time clock
/// and never re-evaluated; records are immutable after parsing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PremiseRecord {
    /// Feed-assigned running number.
    pub index: String,
    /// State name as printed in the feed (may contain embedded newlines).
    pub state: String,
    pub company_name: String,
    pub registered_address: String,
    pub business_address: String,
    pub phone: String,
    /// Certificate issue date, `d/m/Y`.
    pub certificate_date: String,
    /// Certificate expiry date, `d/m/Y`.
    pub expiry_date: String,
    pub serial_no: String,
    /// Whether the certificate expiry lies in the future at load time.
    pub is_active: bool,
    /// Best-effort district extracted from the business address.
    pub district: String,
}

impl PremiseRecord {
    /// The address to geocode: business address, falling back to the
    /// registered address when the business one is blank.
    #[must_use]
    pub fn locatable_address(&self) -> &str {
        if self.business_address.trim().is_empty() {
            &self.registered_address
        } else {
            &self.business_address
        }
    }
}

/// Parses a `d/m/Y` date string. Returns `None` for anything malformed.
#[must_use]
pub fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whether a certificate with the given expiry date counts as active on
/// `today`.
///
/// Fail-closed: a missing or unparsable expiry date is never active, and an
/// expiry on `today` itself has already lapsed.
#[must_use]
pub fn is_active_on(expiry_date: &str, today: NaiveDate) -> bool {
    parse_feed_date(expiry_date).is_some_and(|expiry| expiry > today)
}

/// Flattens embedded line breaks to `", "` and collapses runs of whitespace.
///
/// Addresses and state names arrive with hard-wrapped lines; display, search
/// and geocoding all want the single-line form.
#[must_use]
pub fn collapse_lines(raw: &str) -> String {
    raw.replace('\r', "\n")
        .split('\n')
        .map(|line| {
            line.trim_matches(|c: char| c == ',' || c.is_whitespace())
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalizes a feed state name for exact-match filtering: line breaks
/// stripped, whitespace collapsed, uppercased.
#[must_use]
pub fn normalize_state(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Extracts a district from a business address.
///
/// Heuristic: split the flattened address on commas and take the
/// second-to-last non-empty segment (typically "…, DISTRICT, POSTCODE STATE"),
/// strip any 5-digit postcode-shaped substrings, and uppercase. Addresses
/// with fewer than two segments yield [`UNKNOWN_DISTRICT`].
#[must_use]
pub fn extract_district(address: &str) -> String {
    let flattened = collapse_lines(address);
    let segments: Vec<&str> = flattened
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() < 2 {
        return UNKNOWN_DISTRICT.to_string();
    }

    let postcode = Regex::new(r"\d{5}").expect("valid regex");
    postcode
        .replace_all(segments[segments.len() - 2], "")
        .trim()
        .to_uppercase()
}

/// Builds a Google Maps search URL for a premise, matching the
/// "open in maps" affordance of the directory views.
#[must_use]
pub fn maps_search_url(company_name: &str, address: &str) -> String {
    let query = format!("{company_name}, {}", collapse_lines(address));
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        utf8_percent_encode(&query, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
#[path = "premise_test.rs"]
mod tests;
