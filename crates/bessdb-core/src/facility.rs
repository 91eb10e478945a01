//! Health-facility records from the national facilities master feed.
//!
//! Unlike the premises feed this one is header-driven and already carries
//! coordinates, so no geocoding or derived fields are needed.

use serde::{Deserialize, Serialize};

/// One row of the health-facility feed, kept as provided.
///
/// `lat`/`lon` stay as the feed's decimal strings; consumers that need
/// numbers parse at the point of use.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacilityRecord {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub sector: String,
    #[serde(rename = "type", default)]
    pub facility_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lon: String,
}

impl FacilityRecord {
    /// Directions link using the feed-provided coordinates verbatim.
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            self.lat, self.lon
        )
    }
}
